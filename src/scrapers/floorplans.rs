use crate::error::{ExtractError, FieldError};
use crate::models::FloorplanRecord;
use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, info};

const CONTAINER: &str = "#fp-floor-plan-groups";
const CARD: &str = "div.inner-card-container";
const PRIMARY_LINK: &str = "a.primary";
const PRICE: &str = "span.small-text";
const TITLE: &str = "h2.fp-title";
const AVAILABILITY: &str = "span.availability";
const SIZE: &str = "span.dynamic-text-after";

const TRACKING_ATTR: &str = "data-eptracking";
const LINK_SCHEME: &str = "https:";

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {}: {:?}", css, e))
}

/// Turns a floorplan listing page into records, one per listing card
pub struct FloorplanParser {
    container: Selector,
    card: Selector,
    primary_link: Selector,
    price: Selector,
    title: Selector,
    availability: Selector,
    size: Selector,
    price_pattern: Regex,
}

impl FloorplanParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: selector(CONTAINER)?,
            card: selector(CARD)?,
            primary_link: selector(PRIMARY_LINK)?,
            price: selector(PRICE)?,
            title: selector(TITLE)?,
            availability: selector(AVAILABILITY)?,
            size: selector(SIZE)?,
            price_pattern: Regex::new(r"\$\d{1,3}(?:,\d{3})*(?:\.\d{2})?")?,
        })
    }

    /// Extract every listing card under the floorplan container, in document order.
    ///
    /// Only a missing container is fatal. Each field of each card is derived
    /// independently; a field that fails is logged and left absent.
    pub fn parse(&self, html: &str) -> Result<Vec<FloorplanRecord>, ExtractError> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.container)
            .next()
            .ok_or(ExtractError::MissingContainer(CONTAINER))?;

        let cards: Vec<_> = container.select(&self.card).collect();
        info!("Found {} floorplan cards in HTML", cards.len());

        Ok(cards
            .iter()
            .enumerate()
            .map(|(idx, card)| self.parse_card(idx, *card))
            .collect())
    }

    fn parse_card(&self, idx: usize, card: ElementRef) -> FloorplanRecord {
        FloorplanRecord {
            beds: field(idx, "beds", self.tracking_number(card, "bedroom")),
            baths: field(idx, "baths", self.tracking_number(card, "bathroom")),
            price: field(idx, "price", self.price(card)),
            link: field(idx, "link", self.link(card)),
            title: field(idx, "title", trailing_text(card, &self.title, TITLE)),
            availability: field(
                idx,
                "availability",
                trailing_text(card, &self.availability, AVAILABILITY),
            ),
            size: field(idx, "size", self.size(card)),
        }
    }

    fn primary_link<'a>(&self, card: ElementRef<'a>) -> Result<ElementRef<'a>, FieldError> {
        card.select(&self.primary_link)
            .next()
            .ok_or(FieldError::MissingElement(PRIMARY_LINK))
    }

    /// Bedroom/bathroom counts live in the link's tracking payload,
    /// e.g. `{"bedroom":"1","bathroom":"1.5"}`; values may be strings or numbers.
    fn tracking_number(&self, card: ElementRef, key: &'static str) -> Result<f64, FieldError> {
        let raw = self
            .primary_link(card)?
            .value()
            .attr(TRACKING_ATTR)
            .ok_or(FieldError::MissingAttribute {
                element: PRIMARY_LINK,
                attribute: TRACKING_ATTR,
            })?;

        let payload: Value = serde_json::from_str(raw)?;
        let count = match payload.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        count.ok_or(FieldError::TrackingKey(key))
    }

    fn price(&self, card: ElementRef) -> Result<u64, FieldError> {
        let text = trailing_text(card, &self.price, PRICE)?;
        parse_price(&self.price_pattern, &text)
    }

    fn link(&self, card: ElementRef) -> Result<String, FieldError> {
        let href = self
            .primary_link(card)?
            .value()
            .attr("href")
            .ok_or(FieldError::MissingAttribute {
                element: PRIMARY_LINK,
                attribute: "href",
            })?;
        Ok(absolute_link(href))
    }

    fn size(&self, card: ElementRef) -> Result<u64, FieldError> {
        let text = trailing_text(card, &self.size, SIZE)?;
        parse_size(&text)
    }
}

/// Collapse a field result to an option, logging why it failed
fn field<T>(idx: usize, name: &str, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("card {}: no {} found: {}", idx, name, e);
            None
        }
    }
}

/// Trimmed text of the last child node of the first element matching `selector`.
///
/// Fails when the element is missing, empty, or ends in a nested element.
fn trailing_text(
    card: ElementRef,
    selector: &Selector,
    css: &'static str,
) -> Result<String, FieldError> {
    let element = card
        .select(selector)
        .next()
        .ok_or(FieldError::MissingElement(css))?;

    element
        .children()
        .last()
        .and_then(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .ok_or(FieldError::NotText(css))
}

/// First `$` amount in `text`, separators and cents dropped
fn parse_price(pattern: &Regex, text: &str) -> Result<u64, FieldError> {
    let amount = pattern
        .find(text)
        .ok_or_else(|| FieldError::NoPrice(text.to_string()))?
        .as_str();

    let whole = amount
        .trim_start_matches('$')
        .split('.')
        .next()
        .unwrap_or_default()
        .replace(',', "");
    whole.parse().map_err(|_| FieldError::NotInteger(whole))
}

/// Square footage from text like `1,024 sq. ft.`
fn parse_size(text: &str) -> Result<u64, FieldError> {
    let digits = text
        .trim_matches(|c: char| " sq.ft".contains(c))
        .replace(',', "");
    digits.parse().map_err(|_| FieldError::NotInteger(digits))
}

/// Listing links are protocol-relative (`//host/path`); give them a scheme
fn absolute_link(href: &str) -> String {
    if href.starts_with("//") {
        format!("{}{}", LINK_SCHEME, href)
    } else {
        href.to_string()
    }
}

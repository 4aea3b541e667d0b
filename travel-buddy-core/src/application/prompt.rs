//! Prompt construction.
//!
//! Everything here is pure string building: the same inputs always produce
//! the same prompt.

use crate::domain::TravelContext;
use crate::domain::context::BUDGET_NOT_SPECIFIED;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};
use std::io;

const LABEL_DESTINATION: &str = "Destination";
const LABEL_DATES: &str = "Travel Dates";
const LABEL_BUDGET: &str = "Budget";
const LABEL_INTERESTS: &str = "Interests";

/// Build the effective prompt for `prompt` under an optional travel context.
///
/// Present fields are rendered in the order destination, dates, budget,
/// interests as `"<Label>: <value>"`, joined with `". "`, and prepended as
/// `"Context: <fields>.\n\nQuery: <prompt>"`. Without any non-blank field the
/// prompt is returned unchanged.
pub fn build_travel_prompt(prompt: &str, context: Option<&TravelContext>) -> String {
    let Some(context) = context else {
        return prompt.to_string();
    };

    let mut parts = Vec::with_capacity(4);
    if let Some(destination) = context.destination() {
        parts.push(format!("{LABEL_DESTINATION}: {destination}"));
    }
    if let Some(dates) = context.dates() {
        parts.push(format!("{LABEL_DATES}: {dates}"));
    }
    if let Some(budget) = context.budget() {
        parts.push(format!("{LABEL_BUDGET}: {budget}"));
    }
    let interests: Vec<&str> = context.interests().collect();
    if !interests.is_empty() {
        parts.push(format!("{LABEL_INTERESTS}: {}", interests.join(", ")));
    }

    if parts.is_empty() {
        prompt.to_string()
    } else {
        format!("Context: {}.\n\nQuery: {prompt}", parts.join(". "))
    }
}

/// Narrow a query to one topic, e.g. `hotels`.
pub fn focus_prompt(category: &str, message: &str) -> String {
    format!("Focus on {category} for this query: {message}")
}

/// One-click requests offered next to the chat box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    FindHotels,
    LocalFood,
    Activities,
}

impl QuickAction {
    pub const ALL: [QuickAction; 3] = [Self::FindHotels, Self::LocalFood, Self::Activities];

    pub fn category(self) -> &'static str {
        match self {
            Self::FindHotels => "hotels",
            Self::LocalFood => "food",
            Self::Activities => "activities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FindHotels => "Find Hotels",
            Self::LocalFood => "Local Food",
            Self::Activities => "Activities",
        }
    }

    /// The user-facing request for `destination`.
    pub fn prompt(self, destination: &str, budget: Option<&str>) -> String {
        match self {
            Self::FindHotels => format!(
                "Suggest hotels in {destination} for {} budget",
                budget.unwrap_or(BUDGET_NOT_SPECIFIED)
            ),
            Self::LocalFood => format!("Recommend local food and restaurants in {destination}"),
            Self::Activities => format!("Suggest activities and attractions in {destination}"),
        }
    }
}

/// Inputs for a full itinerary request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelPlan {
    pub destination: String,
    pub dates: Option<String>,
    pub budget: Option<String>,
    pub preferences: Option<Value>,
}

pub fn travel_plan_prompt(plan: &TravelPlan) -> String {
    let dates = non_blank(plan.dates.as_deref()).unwrap_or("Flexible");
    let budget = non_blank(plan.budget.as_deref()).unwrap_or(BUDGET_NOT_SPECIFIED);
    let preferences = match &plan.preferences {
        None | Some(Value::Null) => "None specified".to_string(),
        Some(Value::Object(map)) if map.is_empty() => "None specified".to_string(),
        Some(value) => spaced_json(value),
    };

    format!(
        "Create a travel plan for {destination}\n\
         Dates: {dates}\n\
         Budget: {budget}\n\
         Preferences: {preferences}\n\
         \n\
         Please provide a comprehensive plan including:\n\
         1. Recommended itinerary\n\
         2. Accommodation options\n\
         3. Local food recommendations\n\
         4. Activities and attractions\n\
         5. Transportation tips",
        destination = plan.destination.trim(),
    )
}

/// Writes `", "` between items and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Human-facing labels for project fields, plus popup and HTML rendering.

use shared::{Project, ProjectId};

use crate::listing::ProjectCard;

pub const UNKNOWN_BUDGET: &str = "—";
pub const UNKNOWN_DATE: &str = "?";

/// `$` followed by the amount with comma thousands separators.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn budget_label(project: &Project) -> String {
    project
        .budget()
        .map(format_usd)
        .unwrap_or_else(|| UNKNOWN_BUDGET.to_string())
}

pub fn date_range_label(project: &Project) -> String {
    format!(
        "{} → {}",
        project.start_date().unwrap_or(UNKNOWN_DATE),
        project.end_date().unwrap_or(UNKNOWN_DATE)
    )
}

/// Detail shown when a marker is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub project_id: ProjectId,
    pub title: String,
    pub category: String,
    pub status: String,
    pub city: String,
    pub budget: String,
    pub dates: String,
    pub description: String,
    pub links: Vec<String>,
}

impl PopupContent {
    pub fn for_project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            title: project.name.clone(),
            category: project.category.to_string(),
            status: project.status.to_string(),
            city: project.city.clone(),
            budget: budget_label(project),
            dates: date_range_label(project),
            description: project.description().unwrap_or_default().to_string(),
            links: project.links.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        let links = link_list_html(&self.links, "link");
        format!(
            "<strong>{title}</strong><br/>\n\
             <span class=\"tag\">{category}</span> <span class=\"tag\">{status}</span><br/>\n\
             {city}<br/>\n\
             Budget: {budget}<br/>\n\
             {dates}<br/>\n\
             <small>{description}</small><br/>\n\
             {links}",
            title = escape_html(&self.title),
            category = escape_html(&self.category),
            status = escape_html(&self.status),
            city = escape_html(&self.city),
            budget = escape_html(&self.budget),
            dates = escape_html(&self.dates),
            description = escape_html(&self.description),
        )
    }
}

pub fn card_html(card: &ProjectCard) -> String {
    format!(
        "<div class=\"project-card\" data-project-id=\"{id}\">\n\
         \x20 <div class=\"card-head\"><strong>{name}</strong> <span class=\"tag\">{category}</span></div>\n\
         \x20 <div><span class=\"tag\">{status}</span> <span>{city}</span></div>\n\
         \x20 <div><small>{dates}</small></div>\n\
         \x20 <div><small>Budget: {budget}</small></div>\n\
         \x20 <div class=\"card-links\">{links}</div>\n\
         \x20 <button data-zoom-to=\"{id}\">Zoom to</button>\n\
         </div>",
        id = escape_html(card.id.as_str()),
        name = escape_html(&card.name),
        category = escape_html(&card.category),
        status = escape_html(&card.status),
        city = escape_html(&card.city),
        dates = escape_html(&card.dates),
        budget = escape_html(&card.budget),
        links = link_list_html(&card.links, "source"),
    )
}

pub fn list_html(cards: &[ProjectCard]) -> String {
    cards.iter().map(card_html).collect::<Vec<_>>().join("\n")
}

fn link_list_html(links: &[String], label: &str) -> String {
    links
        .iter()
        .map(|href| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{label}</a>",
                escape_html(href)
            )
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/present_tests.rs"]
mod tests;

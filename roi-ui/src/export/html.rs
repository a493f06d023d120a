use std::borrow::Cow;
use std::fmt::{self, Write};

use async_trait::async_trait;

use super::{DocumentRenderer, ExportError, ExportOptions};
use crate::views::{
    BookSection, DISCLAIMER, OpportunitySection, ResultsView, SUBTITLE, ScenarioLine,
    ScenarioSection, TITLE, TalkingPoints,
};

/// Writes a self-contained HTML page whose print stylesheet carries the
/// page size, orientation, margin and background.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

#[async_trait]
impl DocumentRenderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    async fn render(
        &self,
        view: &ResultsView,
        options: &ExportOptions,
    ) -> Result<Vec<u8>, ExportError> {
        let mut out = String::with_capacity(16 * 1024);
        write_document(&mut out, view, options).map_err(|e| ExportError::Render {
            renderer: "html",
            reason: e.to_string(),
        })?;
        Ok(out.into_bytes())
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
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
    Cow::Owned(escaped)
}

fn write_document(
    out: &mut String,
    view: &ResultsView,
    options: &ExportOptions,
) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape(&options.file_stem))?;
    write_style(out, options)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<main>")?;
    writeln!(out, "<h1>{}</h1>", escape(TITLE))?;
    writeln!(out, "<p class=\"subtitle\">{}</p>", escape(SUBTITLE))?;

    writeln!(out, "<div class=\"cards\">")?;
    for card in &view.cards {
        writeln!(out, "<div class=\"card\">")?;
        writeln!(out, "<div class=\"card-title\">{}</div>", escape(card.title))?;
        writeln!(out, "<div class=\"card-value\">{}</div>", escape(&card.value))?;
        if let Some(caption) = &card.caption {
            writeln!(out, "<div class=\"caption\">{}</div>", escape(caption))?;
        }
        writeln!(out, "</div>")?;
    }
    writeln!(out, "</div>")?;

    write_book(out, &view.book)?;
    write_opportunity(out, &view.opportunity, &view.scenarios)?;
    write_talking_points(out, &view.talking_points)?;

    writeln!(out, "<footer>")?;
    for paragraph in DISCLAIMER {
        writeln!(out, "<p>{}</p>", escape(paragraph))?;
    }
    writeln!(out, "</footer>")?;
    writeln!(out, "</main>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_style(
    out: &mut String,
    options: &ExportOptions,
) -> fmt::Result {
    let background = escape(&options.background);
    writeln!(out, "<style>")?;
    writeln!(
        out,
        "@page {{ size: {} {}; margin: {}mm; }}",
        options.page_size.as_css(),
        options.orientation.as_css(),
        options.margin_mm
    )?;
    writeln!(
        out,
        "html, body {{ margin: 0; background: {background}; color: #ffffff; \
         font-family: Poppins, Helvetica, Arial, sans-serif; \
         -webkit-print-color-adjust: exact; print-color-adjust: exact; }}"
    )?;
    writeln!(out, "main {{ max-width: 72rem; margin: 0 auto; padding: 2rem; }}")?;
    writeln!(out, "h1, h2, h3, .card-value {{ color: #34dfa9; }}")?;
    writeln!(out, ".cards {{ display: flex; gap: 1rem; }}")?;
    writeln!(
        out,
        ".card, section {{ flex: 1; border: 1px solid #3a4047; border-radius: 1rem; \
         padding: 1.25rem; margin-bottom: 1.5rem; }}"
    )?;
    writeln!(out, ".card-value {{ font-size: 1.875rem; font-weight: bold; }}")?;
    writeln!(out, ".caption {{ font-size: 0.75rem; opacity: 0.7; }}")?;
    writeln!(out, "table {{ width: 100%; border-collapse: collapse; }}")?;
    writeln!(out, "th, td {{ padding: 0.5rem; text-align: right; }}")?;
    writeln!(out, "th:first-child, td:first-child {{ text-align: left; }}")?;
    writeln!(out, "tr.total {{ border-top: 1px solid #3a4047; font-weight: bold; }}")?;
    writeln!(out, "footer {{ font-size: 0.75rem; opacity: 0.7; }}")?;
    writeln!(out, "</style>")
}

fn write_book(
    out: &mut String,
    book: &BookSection,
) -> fmt::Result {
    writeln!(out, "<section>")?;
    writeln!(out, "<h2>{}</h2>", escape(BookSection::HEADING))?;
    writeln!(out, "<p>{}</p>", escape(BookSection::NOTE))?;
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<tr><th>Book</th><th>Total Book Amount ($)</th><th>Commission %</th><th>Commission</th></tr>"
    )?;
    for tier in &book.tiers {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&tier.label),
            escape(&tier.amount),
            escape(&tier.pct),
            escape(&tier.commission)
        )?;
    }
    writeln!(out, "</table>")?;
    writeln!(
        out,
        "<p>Current Book Commission Total: <strong>{}</strong></p>",
        escape(&book.total)
    )?;
    writeln!(out, "</section>")
}

fn write_opportunity(
    out: &mut String,
    opportunity: &OpportunitySection,
    scenarios: &ScenarioSection,
) -> fmt::Result {
    writeln!(out, "<section>")?;
    writeln!(out, "<h2>{}</h2>", escape(OpportunitySection::HEADING))?;
    writeln!(out, "<p>{}</p>", escape(OpportunitySection::NOTE))?;
    writeln!(out, "<p>{}</p>", escape(opportunity.mode))?;
    writeln!(out, "<dl>")?;
    for item in &opportunity.inputs {
        writeln!(
            out,
            "<dt>{}</dt><dd>{}</dd>",
            escape(item.label),
            escape(&item.value)
        )?;
    }
    writeln!(
        out,
        "<dt>Conversion Rate %</dt><dd>{}</dd>",
        escape(&opportunity.conversion)
    )?;
    writeln!(out, "</dl>")?;
    writeln!(
        out,
        "<p class=\"caption\">Total payroll: {}</p>",
        escape(&opportunity.total_payroll)
    )?;
    writeln!(
        out,
        "<p class=\"caption\">Gross fee on converted WSE: {}</p>",
        escape(&opportunity.gross_fee)
    )?;

    writeln!(out, "<h3>{}</h3>", escape(ScenarioSection::HEADING))?;
    writeln!(out, "<table>")?;
    write!(out, "<tr>")?;
    for header in ScenarioSection::HEADERS {
        write!(out, "<th>{}</th>", escape(header))?;
    }
    writeln!(out, "</tr>")?;
    for line in &scenarios.rows {
        write_scenario_line(out, line, "")?;
    }
    if let Some(totals) = &scenarios.totals {
        write_scenario_line(out, totals, " class=\"total\"")?;
    }
    writeln!(out, "</table>")?;
    writeln!(out, "</section>")
}

fn write_scenario_line(
    out: &mut String,
    line: &ScenarioLine,
    row_attrs: &str,
) -> fmt::Result {
    writeln!(
        out,
        "<tr{row_attrs}><td>{}</td>\
         <td>{}<div class=\"caption\">{}</div></td>\
         <td>{}<div class=\"caption\">{}</div></td>\
         <td>{}</td>\
         <td>{}<div class=\"caption\">{}</div></td></tr>",
        escape(&line.label),
        escape(&line.mgmt_commission),
        escape(&line.mgmt_share),
        escape(&line.current_book),
        escape(&line.book_share),
        escape(&line.total_revenue),
        escape(&line.value_added_pct),
        escape(&line.value_added_abs)
    )
}

fn write_talking_points(
    out: &mut String,
    points: &TalkingPoints,
) -> fmt::Result {
    writeln!(out, "<section>")?;
    writeln!(out, "<h2>{}</h2>", escape(TalkingPoints::HEADING))?;
    writeln!(out, "<ul>")?;
    for bullet in &points.bullets {
        writeln!(out, "<li>{}</li>", escape(bullet))?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</section>")
}

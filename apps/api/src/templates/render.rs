//! Shared SVG layout engine behind every template's render function.
//!
//! Each template is a pure function `&ResumeDocument -> RenderedPage`; the
//! five public functions here pair the shared layout with a [`Theme`]. The
//! page is A4-proportioned at 96 dpi so fill-mode PDF composition stretches
//! it onto the output page without visible distortion.

use crate::models::{ResumeDocument, WorkExperience};
use crate::templates::theme::{self, HeaderAlign, RuleStyle, Theme};
use crate::templates::RenderedPage;

/// A4 at 96 dpi.
pub const PAGE_WIDTH_PX: u32 = 794;
pub const PAGE_HEIGHT_PX: u32 = 1123;

const MARGIN_PX: f32 = 56.0;
const CONTENT_WIDTH_PX: f32 = PAGE_WIDTH_PX as f32 - 2.0 * MARGIN_PX;

pub const EMPTY_PLACEHOLDER: &str = "Start filling out the form to see your resume here!";

pub fn avant_garde(doc: &ResumeDocument) -> RenderedPage {
    render_with_theme(doc, &theme::AVANT_GARDE)
}

pub fn tech_innovator(doc: &ResumeDocument) -> RenderedPage {
    render_with_theme(doc, &theme::TECH_INNOVATOR)
}

pub fn elegant_storyteller(doc: &ResumeDocument) -> RenderedPage {
    render_with_theme(doc, &theme::ELEGANT_STORYTELLER)
}

pub fn dynamic_grid(doc: &ResumeDocument) -> RenderedPage {
    render_with_theme(doc, &theme::DYNAMIC_GRID)
}

pub fn vibrant_ui(doc: &ResumeDocument) -> RenderedPage {
    render_with_theme(doc, &theme::VIBRANT_UI)
}

fn render_with_theme(doc: &ResumeDocument, theme: &Theme) -> RenderedPage {
    let mut page = SvgPage::new(theme);

    if doc.is_blank() {
        page.centered_text(
            EMPTY_PLACEHOLDER,
            PAGE_HEIGHT_PX as f32 / 2.0,
            16.0,
            theme.muted,
        );
        return page.finish();
    }

    page.header(doc);
    page.summary(doc);
    page.experience_section(doc);
    page.education_section(doc);
    page.skills_section(doc);
    page.finish()
}

/// Incremental SVG builder with a vertical layout cursor.
struct SvgPage<'a> {
    theme: &'a Theme,
    body: String,
    cursor_y: f32,
}

impl<'a> SvgPage<'a> {
    fn new(theme: &'a Theme) -> Self {
        let mut body = String::new();
        body.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{PAGE_WIDTH_PX}\" height=\"{PAGE_HEIGHT_PX}\" fill=\"{}\"/>",
            theme.background
        ));
        Self {
            theme,
            body,
            cursor_y: MARGIN_PX + 14.0,
        }
    }

    fn finish(self) -> RenderedPage {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{PAGE_WIDTH_PX}\" height=\"{PAGE_HEIGHT_PX}\" \
             viewBox=\"0 0 {PAGE_WIDTH_PX} {PAGE_HEIGHT_PX}\">{}</svg>",
            self.body
        );
        RenderedPage {
            svg,
            width_px: PAGE_WIDTH_PX,
            height_px: PAGE_HEIGHT_PX,
        }
    }

    fn header(&mut self, doc: &ResumeDocument) {
        let info = &doc.personal_info;
        let name = or_placeholder(&info.name, "Your Name");

        match self.theme.header_align {
            HeaderAlign::Center => {
                self.centered_heading(&name, 34.0, self.theme.ink);
                if let Some(title) = info.job_title.as_deref().filter(|t| !t.is_empty()) {
                    self.cursor_y += 24.0;
                    self.centered_heading(title, 16.0, self.theme.accent);
                }
            }
            HeaderAlign::Left => {
                self.heading_at(MARGIN_PX, &name, 34.0, self.theme.ink);
                if let Some(title) = info.job_title.as_deref().filter(|t| !t.is_empty()) {
                    self.cursor_y += 24.0;
                    self.heading_at(MARGIN_PX, title, 16.0, self.theme.accent);
                }
            }
        }
        self.cursor_y += 22.0;

        let mut contact: Vec<String> = Vec::new();
        for part in [&info.email, &info.phone, &info.address] {
            if !part.is_empty() {
                contact.push(part.clone());
            }
        }
        if let Some(linkedin) = info.linkedin.as_deref().filter(|v| !v.is_empty()) {
            contact.push(format!("LinkedIn: {linkedin}"));
        }
        if let Some(portfolio) = info.portfolio.as_deref().filter(|v| !v.is_empty()) {
            contact.push(format!("Portfolio: {portfolio}"));
        }
        if !contact.is_empty() {
            let line = contact.join("  |  ");
            match self.theme.header_align {
                HeaderAlign::Center => {
                    self.centered_text(&line, self.cursor_y, 11.0, self.theme.muted)
                }
                HeaderAlign::Left => self.body_text(&line, 11.0, self.theme.muted),
            }
            self.cursor_y += 16.0;
        }
        self.cursor_y += 14.0;
    }

    fn summary(&mut self, doc: &ResumeDocument) {
        if doc.summary.is_empty() {
            return;
        }
        self.section_heading("Summary");
        self.wrapped_paragraph(&doc.summary, 12.0, self.theme.ink);
        self.cursor_y += 12.0;
    }

    fn experience_section(&mut self, doc: &ResumeDocument) {
        let entries: Vec<&WorkExperience> = doc
            .experience
            .iter()
            .filter(|e| !e.job_title.is_empty())
            .collect();
        if entries.is_empty() {
            return;
        }
        self.section_heading("Work Experience");
        for exp in entries {
            self.heading_at(MARGIN_PX, &exp.job_title, 14.0, self.theme.ink);
            self.cursor_y += 18.0;

            let mut line = exp.company.clone();
            if !exp.location.is_empty() {
                if !line.is_empty() {
                    line.push_str(" — ");
                }
                line.push_str(&exp.location);
            }
            if !line.is_empty() {
                self.body_text(&line, 12.0, self.theme.accent);
                self.cursor_y += 16.0;
            }
            let dates = date_range(&exp.start_date, &exp.end_date);
            if !dates.is_empty() {
                self.body_text(&dates, 10.0, self.theme.muted);
                self.cursor_y += 14.0;
            }
            for bullet in exp.responsibilities.lines().filter(|l| !l.trim().is_empty()) {
                self.wrapped_bullet(bullet.trim(), 11.0);
            }
            self.cursor_y += 10.0;
        }
        self.cursor_y += 6.0;
    }

    fn education_section(&mut self, doc: &ResumeDocument) {
        let entries: Vec<_> = doc.education.iter().filter(|e| !e.degree.is_empty()).collect();
        if entries.is_empty() {
            return;
        }
        self.section_heading("Education");
        for edu in entries {
            self.heading_at(MARGIN_PX, &edu.degree, 14.0, self.theme.ink);
            self.cursor_y += 18.0;

            let mut line = edu.institution.clone();
            if !edu.location.is_empty() {
                if !line.is_empty() {
                    line.push_str(" — ");
                }
                line.push_str(&edu.location);
            }
            if !line.is_empty() {
                self.body_text(&line, 12.0, self.theme.accent);
                self.cursor_y += 16.0;
            }
            if !edu.graduation_date.is_empty() {
                self.body_text(&edu.graduation_date, 10.0, self.theme.muted);
                self.cursor_y += 14.0;
            }
            if let Some(details) = edu.details.as_deref().filter(|d| !d.is_empty()) {
                self.wrapped_paragraph(details, 11.0, self.theme.ink);
            }
            self.cursor_y += 10.0;
        }
        self.cursor_y += 6.0;
    }

    fn skills_section(&mut self, doc: &ResumeDocument) {
        let skills: Vec<&str> = doc
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if skills.is_empty() {
            return;
        }
        self.section_heading("Skills");
        self.wrapped_paragraph(&skills.join(", "), 12.0, self.theme.ink);
    }

    fn section_heading(&mut self, label: &str) {
        let text = if self.theme.uppercase_headings {
            label.to_uppercase()
        } else {
            label.to_string()
        };
        let y = self.cursor_y;
        match self.theme.rule_style {
            RuleStyle::LeftBar => {
                self.body.push_str(&format!(
                    "<rect x=\"{x}\" y=\"{bar_y}\" width=\"4\" height=\"18\" fill=\"{accent}\"/>",
                    x = MARGIN_PX,
                    bar_y = y - 14.0,
                    accent = self.theme.accent,
                ));
                self.text_at(MARGIN_PX + 12.0, y, &text, 16.0, self.theme.accent, self.theme.heading_font, true);
            }
            RuleStyle::Underline => {
                self.text_at(MARGIN_PX, y, &text, 16.0, self.theme.accent, self.theme.heading_font, true);
                self.body.push_str(&format!(
                    "<line x1=\"{x1}\" y1=\"{ly}\" x2=\"{x2}\" y2=\"{ly}\" stroke=\"{accent}\" stroke-width=\"1.5\"/>",
                    x1 = MARGIN_PX,
                    x2 = MARGIN_PX + CONTENT_WIDTH_PX,
                    ly = y + 6.0,
                    accent = self.theme.accent,
                ));
            }
        }
        self.cursor_y += 26.0;
    }

    fn wrapped_paragraph(&mut self, text: &str, size: f32, fill: &str) {
        for line in wrap_text(text, chars_per_line(size)) {
            self.body_text(&line, size, fill);
            self.cursor_y += size + 4.0;
        }
    }

    fn wrapped_bullet(&mut self, text: &str, size: f32) {
        let lines = wrap_text(text, chars_per_line(size).saturating_sub(3));
        for (i, line) in lines.iter().enumerate() {
            let content = if i == 0 {
                format!("\u{2022}  {line}")
            } else {
                format!("   {line}")
            };
            self.text_at(
                MARGIN_PX + 10.0,
                self.cursor_y,
                &content,
                size,
                self.theme.ink,
                self.theme.body_font,
                false,
            );
            self.cursor_y += size + 4.0;
        }
    }

    fn body_text(&mut self, text: &str, size: f32, fill: &str) {
        self.text_at(MARGIN_PX, self.cursor_y, text, size, fill, self.theme.body_font, false);
    }

    fn heading_at(&mut self, x: f32, text: &str, size: f32, fill: &str) {
        self.text_at(x, self.cursor_y, text, size, fill, self.theme.heading_font, true);
    }

    fn centered_heading(&mut self, text: &str, size: f32, fill: &str) {
        let y = self.cursor_y;
        self.body.push_str(&format!(
            "<text x=\"{cx}\" y=\"{y}\" text-anchor=\"middle\" font-family=\"{font}\" \
             font-size=\"{size}\" font-weight=\"bold\" fill=\"{fill}\">{text}</text>",
            cx = PAGE_WIDTH_PX as f32 / 2.0,
            font = self.theme.heading_font,
            text = escape_xml(text),
        ));
    }

    fn centered_text(&mut self, text: &str, y: f32, size: f32, fill: &str) {
        self.body.push_str(&format!(
            "<text x=\"{cx}\" y=\"{y}\" text-anchor=\"middle\" font-family=\"{font}\" \
             font-size=\"{size}\" fill=\"{fill}\">{text}</text>",
            cx = PAGE_WIDTH_PX as f32 / 2.0,
            font = self.theme.body_font,
            text = escape_xml(text),
        ));
    }

    #[allow(clippy::too_many_arguments)]
    fn text_at(&mut self, x: f32, y: f32, text: &str, size: f32, fill: &str, font: &str, bold: bool) {
        let weight = if bold { " font-weight=\"bold\"" } else { "" };
        self.body.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-family=\"{font}\" font-size=\"{size}\"{weight} \
             fill=\"{fill}\">{text}</text>",
            text = escape_xml(text),
        ));
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn date_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

/// Approximate character budget for one wrapped line. SVG `<text>` has no
/// automatic wrapping, so we wrap by an average-glyph-width estimate.
fn chars_per_line(font_size: f32) -> usize {
    (CONTENT_WIDTH_PX / (font_size * 0.55)).floor() as usize
}

/// Greedy word wrap. Words longer than the budget get their own line rather
/// than being split mid-word.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

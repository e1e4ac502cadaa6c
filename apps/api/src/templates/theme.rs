//! Per-template visual themes applied by the shared layout engine.

/// How a section heading is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStyle {
    /// Full-width rule under the heading text.
    Underline,
    /// Accent bar to the left of the heading text.
    LeftBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAlign {
    Center,
    Left,
}

/// Everything that differs between the five templates. Layout (wrapping,
/// section flow, entry filtering) is shared.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: &'static str,
    pub ink: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub rule_style: RuleStyle,
    pub header_align: HeaderAlign,
    pub uppercase_headings: bool,
}

pub const AVANT_GARDE: Theme = Theme {
    background: "#f5f0e8",
    ink: "#1a1a1a",
    muted: "#6b6257",
    accent: "#d3452c",
    heading_font: "serif",
    body_font: "sans-serif",
    rule_style: RuleStyle::LeftBar,
    header_align: HeaderAlign::Left,
    uppercase_headings: true,
};

pub const TECH_INNOVATOR: Theme = Theme {
    background: "#111827",
    ink: "#e5e7eb",
    muted: "#9ca3af",
    accent: "#22d3ee",
    heading_font: "monospace",
    body_font: "monospace",
    rule_style: RuleStyle::LeftBar,
    header_align: HeaderAlign::Center,
    uppercase_headings: true,
};

pub const ELEGANT_STORYTELLER: Theme = Theme {
    background: "#fffdf8",
    ink: "#2d2a26",
    muted: "#8a8378",
    accent: "#7c5c3e",
    heading_font: "serif",
    body_font: "serif",
    rule_style: RuleStyle::Underline,
    header_align: HeaderAlign::Center,
    uppercase_headings: false,
};

pub const DYNAMIC_GRID: Theme = Theme {
    background: "#ffffff",
    ink: "#111111",
    muted: "#555555",
    accent: "#2563eb",
    heading_font: "sans-serif",
    body_font: "sans-serif",
    rule_style: RuleStyle::Underline,
    header_align: HeaderAlign::Left,
    uppercase_headings: true,
};

pub const VIBRANT_UI: Theme = Theme {
    background: "#fdf2f8",
    ink: "#312e3f",
    muted: "#7a7490",
    accent: "#db2777",
    heading_font: "sans-serif",
    body_font: "sans-serif",
    rule_style: RuleStyle::LeftBar,
    header_align: HeaderAlign::Center,
    uppercase_headings: false,
};

//! Filter form popup: category and generation toggles plus height and
//! weight ranges.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use dex_core::config::theme::Theme;
use dex_core::nav::filter::{FilterConditions, MeasureRange};
use dex_core::{Category, Generation};

use crate::ui::popup::{centered_rect, render_popup_lines};

/// One focusable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category(Category),
    Generation(Generation),
    HeightMin,
    HeightMax,
    WeightMin,
    WeightMax,
}

impl FilterField {
    fn section(self) -> usize {
        match self {
            Self::Category(_) => 0,
            Self::Generation(_) => 1,
            Self::HeightMin | Self::HeightMax | Self::WeightMin | Self::WeightMax => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::HeightMin => "Height min (m)",
            Self::HeightMax => "Height max (m)",
            Self::WeightMin => "Weight min (kg)",
            Self::WeightMax => "Weight max (kg)",
            Self::Category(_) | Self::Generation(_) => "",
        }
    }
}

fn all_fields() -> Vec<FilterField> {
    let mut fields: Vec<FilterField> = Category::ALL.into_iter().map(FilterField::Category).collect();
    fields.extend(Generation::ALL.into_iter().map(FilterField::Generation));
    fields.extend([
        FilterField::HeightMin,
        FilterField::HeightMax,
        FilterField::WeightMin,
        FilterField::WeightMax,
    ]);
    fields
}

/// Editable copy of the filter conditions. Nothing is applied until
/// [`FilterFormState::to_conditions`] succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFormState {
    categories: Vec<Category>,
    generations: Vec<Generation>,
    height_min: String,
    height_max: String,
    weight_min: String,
    weight_max: String,
    cursor: usize,
    error: Option<String>,
}

impl Default for FilterFormState {
    fn default() -> Self {
        Self::from_conditions(&FilterConditions::default())
    }
}

fn bound_text(tenths: Option<u32>) -> String {
    tenths
        .map(|t| format!("{:.1}", f64::from(t) / 10.0))
        .unwrap_or_default()
}

fn parse_bound(label: &str, text: &str) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(format!("{label}: '{text}' is not a number")),
    }
}

fn parse_range(name: &str, min: &str, max: &str) -> Result<MeasureRange, String> {
    let range = MeasureRange::from_units(
        parse_bound(&format!("{name} min"), min)?,
        parse_bound(&format!("{name} max"), max)?,
    );
    match (range.min_tenths, range.max_tenths) {
        (Some(lo), Some(hi)) if lo > hi => Err(format!("{name}: min is greater than max")),
        _ => Ok(range),
    }
}

impl FilterFormState {
    /// Pre-fills the form from the active conditions.
    pub fn from_conditions(conditions: &FilterConditions) -> Self {
        Self {
            categories: conditions.categories.clone(),
            generations: conditions.generations.clone(),
            height_min: bound_text(conditions.height.min_tenths),
            height_max: bound_text(conditions.height.max_tenths),
            weight_min: bound_text(conditions.weight.min_tenths),
            weight_max: bound_text(conditions.weight.max_tenths),
            cursor: 0,
            error: None,
        }
    }

    pub fn focused(&self) -> FilterField {
        let fields = all_fields();
        fields[self.cursor.min(fields.len() - 1)]
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_selected(&self, field: FilterField) -> bool {
        match field {
            FilterField::Category(c) => self.categories.contains(&c),
            FilterField::Generation(g) => self.generations.contains(&g),
            _ => false,
        }
    }

    fn text(&self, field: FilterField) -> &str {
        match field {
            FilterField::HeightMin => &self.height_min,
            FilterField::HeightMax => &self.height_max,
            FilterField::WeightMin => &self.weight_min,
            FilterField::WeightMax => &self.weight_max,
            FilterField::Category(_) | FilterField::Generation(_) => "",
        }
    }

    fn text_mut(&mut self, field: FilterField) -> Option<&mut String> {
        match field {
            FilterField::HeightMin => Some(&mut self.height_min),
            FilterField::HeightMax => Some(&mut self.height_max),
            FilterField::WeightMin => Some(&mut self.weight_min),
            FilterField::WeightMax => Some(&mut self.weight_max),
            FilterField::Category(_) | FilterField::Generation(_) => None,
        }
    }

    #[must_use]
    pub fn with_cursor_down(self) -> Self {
        let len = all_fields().len();
        Self {
            cursor: (self.cursor + 1) % len,
            ..self
        }
    }

    #[must_use]
    pub fn with_cursor_up(self) -> Self {
        let len = all_fields().len();
        Self {
            cursor: (self.cursor + len - 1) % len,
            ..self
        }
    }

    /// Jumps to the first row of the next section (wrapping).
    #[must_use]
    pub fn with_next_section(self) -> Self {
        let fields = all_fields();
        let current = self.focused().section();
        let cursor = fields
            .iter()
            .position(|f| f.section() == (current + 1) % 3)
            .unwrap_or(0);
        Self { cursor, ..self }
    }

    /// Toggles the focused category or generation.
    #[must_use]
    pub fn with_toggle(self) -> Self {
        let conditions = FilterConditions::new()
            .with_categories(self.categories.iter().copied())
            .with_generations(self.generations.iter().copied());
        let conditions = match self.focused() {
            FilterField::Category(c) => conditions.toggle_category(c),
            FilterField::Generation(g) => conditions.toggle_generation(g),
            _ => return self,
        };
        Self {
            categories: conditions.categories,
            generations: conditions.generations,
            error: None,
            ..self
        }
    }

    /// Types into the focused range field. Only digits and `.` are accepted.
    #[must_use]
    pub fn with_char(mut self, c: char) -> Self {
        if !(c.is_ascii_digit() || c == '.') {
            return self;
        }
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.error = None;
        }
        self
    }

    #[must_use]
    pub fn with_backspace(mut self) -> Self {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.error = None;
        }
        self
    }

    /// Empties every selection and range, keeping the cursor.
    #[must_use]
    pub fn cleared(self) -> Self {
        Self {
            cursor: self.cursor,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_error(self, error: String) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    /// Validates the form into filter conditions.
    ///
    /// # Errors
    ///
    /// A message naming the offending field when a bound is not a number or
    /// a minimum exceeds its maximum.
    pub fn to_conditions(&self) -> Result<FilterConditions, String> {
        let height = parse_range("Height", &self.height_min, &self.height_max)?;
        let weight = parse_range("Weight", &self.weight_min, &self.weight_max)?;
        Ok(FilterConditions::new()
            .with_categories(self.categories.iter().copied())
            .with_generations(self.generations.iter().copied())
            .with_height(height)
            .with_weight(weight))
    }

    /// Form content as display lines.
    pub fn lines(&self, language: &str) -> Vec<Line<'static>> {
        let focused = self.focused();
        let heading = |s: &str| {
            Line::from(Span::styled(
                s.to_owned(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        };
        let toggle = |field: FilterField, label: String| {
            let mark = if self.is_selected(field) { "[x]" } else { "[ ]" };
            let style = if field == focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!("{mark} {label:<10}"), style)
        };

        let mut lines = vec![heading("Type")];
        for row in Category::ALL.chunks(6) {
            let spans: Vec<Span> = row
                .iter()
                .map(|c| toggle(FilterField::Category(*c), c.label_for(language).to_owned()))
                .collect();
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(heading("Generation"));
        let spans: Vec<Span> = Generation::ALL
            .iter()
            .map(|g| toggle(FilterField::Generation(*g), g.code().to_owned()))
            .collect();
        for row in spans.chunks(5) {
            lines.push(Line::from(row.to_vec()));
        }

        lines.push(Line::from(""));
        lines.push(heading("Size"));
        for field in [
            FilterField::HeightMin,
            FilterField::HeightMax,
            FilterField::WeightMin,
            FilterField::WeightMax,
        ] {
            let is_focused = field == focused;
            let marker = if is_focused { "> " } else { "  " };
            let cursor = if is_focused { "_" } else { "" };
            let style = if is_focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{:<16}{}{cursor}", field.label(), self.text(field)),
                style,
            )));
        }

        lines.push(Line::from(""));
        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  Error: {err}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "  j/k: move | Tab: section | Space: toggle | c: clear | Enter: apply | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

/// Renders the filter form as a centered popup.
pub fn render_filter_form(f: &mut Frame, state: &FilterFormState, language: &str, theme: &Theme) {
    let area = centered_rect(80, 70, f.area());
    render_popup_lines(f, area, "Filter", state.lines(language), 0, theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(state: FilterFormState, field: FilterField) -> FilterFormState {
        let mut state = state;
        while state.focused() != field {
            state = state.with_cursor_down();
        }
        state
    }

    // --- navigation ---

    #[test]
    fn cursor_wraps() {
        let state = FilterFormState::default();
        assert_eq!(state.focused(), FilterField::Category(Category::ALL[0]));
        let state = state.with_cursor_up();
        assert_eq!(state.focused(), FilterField::WeightMax);
        let state = state.with_cursor_down();
        assert_eq!(state.focused(), FilterField::Category(Category::ALL[0]));
    }

    #[test]
    fn next_section_jumps() {
        let state = FilterFormState::default().with_next_section();
        assert_eq!(state.focused(), FilterField::Generation(Generation::ALL[0]));
        let state = state.with_next_section();
        assert_eq!(state.focused(), FilterField::HeightMin);
        let state = state.with_next_section();
        assert_eq!(state.focused(), FilterField::Category(Category::ALL[0]));
    }

    // --- editing ---

    #[test]
    fn toggle_category_and_generation() {
        let state = focus(FilterFormState::default(), FilterField::Category(Category::Fire))
            .with_toggle();
        let state = focus(state, FilterField::Generation(Generation::ALL[2])).with_toggle();

        let conditions = state.to_conditions().unwrap();
        assert_eq!(conditions.categories, vec![Category::Fire]);
        assert_eq!(conditions.generations, vec![Generation::ALL[2]]);

        let state = focus(state, FilterField::Category(Category::Fire)).with_toggle();
        assert!(state.to_conditions().unwrap().categories.is_empty());
    }

    #[test]
    fn typing_only_reaches_range_fields() {
        let state = FilterFormState::default().with_char('5');
        assert_eq!(state, FilterFormState::default());

        let state = focus(FilterFormState::default(), FilterField::HeightMin)
            .with_char('0')
            .with_char('.')
            .with_char('5')
            .with_char('x');
        assert_eq!(state.text(FilterField::HeightMin), "0.5");
        let state = state.with_backspace();
        assert_eq!(state.text(FilterField::HeightMin), "0.");
    }

    #[test]
    fn ranges_convert_to_tenths() {
        let state = focus(FilterFormState::default(), FilterField::HeightMin).with_char('1');
        let state = focus(state, FilterField::WeightMax)
            .with_char('6')
            .with_char('9')
            .with_char('.')
            .with_char('5');
        let conditions = state.to_conditions().unwrap();
        assert_eq!(conditions.height.min_tenths, Some(10));
        assert_eq!(conditions.height.max_tenths, None);
        assert_eq!(conditions.weight.max_tenths, Some(695));
    }

    #[test]
    fn invalid_bound_is_an_error() {
        let state = focus(FilterFormState::default(), FilterField::HeightMax)
            .with_char('.')
            .with_char('.');
        let err = state.to_conditions().unwrap_err();
        assert!(err.contains("Height max"));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let state = focus(FilterFormState::default(), FilterField::WeightMin).with_char('9');
        let state = focus(state, FilterField::WeightMax).with_char('1');
        assert_eq!(
            state.to_conditions().unwrap_err(),
            "Weight: min is greater than max"
        );
    }

    #[test]
    fn bound_rejects_negative_and_non_finite() {
        for text in ["-1", "-0.5", "NaN", "inf", "-inf"] {
            assert_eq!(
                parse_bound("Height min", text).unwrap_err(),
                format!("Height min: '{text}' is not a number")
            );
        }
        assert_eq!(parse_bound("Height min", " 1.5 "), Ok(Some(1.5)));
        assert_eq!(parse_bound("Height min", "0"), Ok(Some(0.0)));
    }

    #[test]
    fn prefilled_from_conditions_round_trips() {
        let conditions = FilterConditions::new()
            .with_categories([Category::Water])
            .with_height(MeasureRange::from_units(Some(0.5), Some(2.0)));
        let state = FilterFormState::from_conditions(&conditions);
        assert_eq!(state.text(FilterField::HeightMin), "0.5");
        assert_eq!(state.text(FilterField::HeightMax), "2.0");
        assert_eq!(state.to_conditions().unwrap(), conditions);
    }

    #[test]
    fn cleared_keeps_cursor() {
        let state = focus(FilterFormState::default(), FilterField::Category(Category::Ice))
            .with_toggle()
            .cleared();
        assert_eq!(state.focused(), FilterField::Category(Category::Ice));
        assert!(state.to_conditions().unwrap().is_empty());
    }

    #[test]
    fn lines_mark_selection_and_error() {
        let state = focus(FilterFormState::default(), FilterField::Category(Category::Grass))
            .with_toggle()
            .with_error("bad".to_owned());
        let text: Vec<String> = state
            .lines("en")
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("[x] Grass")));
        assert!(text.iter().any(|l| l.contains("Error: bad")));
    }
}

//! # Richtext
//!
//! Lightweight rich text: a CSS-like stylesheet plus an XML-like markup
//! fragment in, an ordered sequence of styled text runs out.
//!
//! ```
//! use richtext::RichText;
//!
//! let rich = RichText::new("title { font-size: 24; color: #ff0000; }");
//! let runs = rich.render("<title>Hello</title> world").unwrap();
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].text, "Hello");
//! assert_eq!(runs[0].style.font.size, 24.0);
//! assert_eq!(runs[1].text, " world");
//! ```
//!
//! Element styles inherit: each entered element merges its rule's spec
//! over the enclosing style, so `<outer><inner>` text carries both
//! contributions. Resolving the requested font to a real one, and turning
//! runs into something displayable, is the host's concern.

use smallvec::{smallvec, SmallVec};
use tracing::debug;

pub use richtext_css::{parse_color, Color, ColorError, StyleSpec, Stylesheet, TextAlignment};
pub use richtext_markup::{MarkupError, MarkupSink};

/// Host-environment defaults seeding the root style frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub font_name: String,
    pub font_size: f32,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            font_name: "sans-serif".to_string(),
            font_size: 16.0,
        }
    }
}

/// A font request. The host resolves the name/size pair to a renderable
/// font; lookup failure is the host's to handle.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRef {
    pub name: String,
    pub size: f32,
}

/// A fully-resolved style carried by one run.
///
/// The font is always present (the root frame guarantees it). The other
/// attributes are present only if some enclosing element set them; an
/// absent attribute means the host's ambient default applies, which is not
/// the same as being set to a default value here.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font: FontRef,
    pub color: Option<Color>,
    pub alignment: Option<TextAlignment>,
    pub line_height: Option<f32>,
    pub baseline_offset: Option<f32>,
}

impl ResolvedStyle {
    fn from_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            font: FontRef {
                name: defaults.font_name.clone(),
                size: defaults.font_size,
            },
            color: None,
            alignment: None,
            line_height: None,
            baseline_offset: None,
        }
    }

    /// Build the frame for an entered element: every field the spec sets
    /// wins, everything else inherits from this frame.
    fn overridden_by(&self, spec: &StyleSpec) -> Self {
        Self {
            font: FontRef {
                name: spec
                    .font_name
                    .clone()
                    .unwrap_or_else(|| self.font.name.clone()),
                size: spec.font_size.unwrap_or(self.font.size),
            },
            color: spec.color.or(self.color),
            alignment: spec.alignment.or(self.alignment),
            line_height: spec.line_height.or(self.line_height),
            baseline_offset: spec.baseline_offset.or(self.baseline_offset),
        }
    }
}

/// One maximal text span paired with its resolved style, in document order.
///
/// Adjacent runs with equal styles are not merged; a run closes at every
/// element boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: ResolvedStyle,
}

/// The markup sink that maintains the style stack and emits runs.
///
/// The root frame lives outside the element stack, so the current style is
/// always defined and no close event can ever pop past the root.
struct RunBuilder<'a> {
    stylesheet: &'a Stylesheet,
    root: ResolvedStyle,
    stack: SmallVec<[ResolvedStyle; 8]>,
    current_text: String,
    runs: Vec<StyledRun>,
}

impl<'a> RunBuilder<'a> {
    fn new(stylesheet: &'a Stylesheet, defaults: &StyleDefaults) -> Self {
        Self {
            stylesheet,
            root: ResolvedStyle::from_defaults(defaults),
            stack: smallvec![],
            current_text: String::new(),
            runs: Vec::new(),
        }
    }

    fn top(&self) -> &ResolvedStyle {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Close the pending text span into one run. Empty spans emit nothing.
    fn flush(&mut self) {
        if self.current_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current_text);
        let style = self.top().clone();
        self.runs.push(StyledRun { text, style });
    }

    fn into_runs(mut self) -> Vec<StyledRun> {
        self.flush();
        self.runs
    }
}

impl MarkupSink for RunBuilder<'_> {
    fn start_element(&mut self, name: &str) {
        self.flush();
        let next = match self.stylesheet.get(name) {
            Some(spec) => self.top().overridden_by(spec),
            None => self.top().clone(),
        };
        self.stack.push(next);
    }

    fn end_element(&mut self, _name: &str) {
        self.flush();
        self.stack.pop();
    }

    fn text(&mut self, data: &str) {
        self.current_text.push_str(data);
    }
}

/// A reusable stylesheet-backed renderer.
///
/// Construction parses the stylesheet once; `render` may then be called
/// any number of times, from any thread, each call with private state.
#[derive(Debug, Clone)]
pub struct RichText {
    stylesheet: Stylesheet,
    defaults: StyleDefaults,
}

impl RichText {
    /// Parse a stylesheet and build a renderer with default root styling.
    pub fn new(stylesheet: &str) -> Self {
        Self::with_defaults(stylesheet, StyleDefaults::default())
    }

    /// Like [`RichText::new`], with the stylesheet split across fragments
    /// that are concatenated in argument order before parsing.
    pub fn from_fragments(fragments: &[&str]) -> Self {
        Self {
            stylesheet: Stylesheet::from_fragments(fragments),
            defaults: StyleDefaults::default(),
        }
    }

    /// Parse a stylesheet and seed the root style frame from `defaults`.
    pub fn with_defaults(stylesheet: &str, defaults: StyleDefaults) -> Self {
        Self {
            stylesheet: Stylesheet::parse(stylesheet),
            defaults,
        }
    }

    /// The parsed rule mapping.
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Convert a markup fragment into styled runs.
    ///
    /// The fragment is treated as the content of an implicit root element:
    /// top-level text resolves against the root defaults, and multiple
    /// top-level siblings are accepted. Structural errors (mismatched,
    /// unbalanced or unclosed tags) fail the whole call; runs are never
    /// partially returned.
    pub fn render(&self, markup: &str) -> Result<Vec<StyledRun>, MarkupError> {
        let builder = RunBuilder::new(&self.stylesheet, &self.defaults);
        let builder = richtext_markup::parse(markup, builder)?;
        let runs = builder.into_runs();
        debug!(run_count = runs.len(), "markup rendered");
        Ok(runs)
    }
}

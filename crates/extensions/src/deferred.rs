//! Deferred snippets and widgets.
//!
//! Extensions register content while a request is processed; the rendering
//! pipeline picks it up from [`RenderQueues`] when it builds the response,
//! and clears the queues at the end of the pass.

use std::{convert::Infallible, fmt, str::FromStr, sync::Arc};

use serde_json::Value;

use crate::{error::Error, queue::DeferredQueue};

/// Produces HTML from the item's argument list.
pub type Callback = Arc<dyn Fn(&[Value]) -> String + Send + Sync>;

/// What a deferred item renders.
#[derive(Clone)]
pub enum Payload {
    Html(String),
    Callback(Callback),
}

impl Payload {
    pub fn callback(f: impl Fn(&[Value]) -> String + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html(html) => f.debug_tuple("Html").field(html).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<String> for Payload {
    fn from(html: String) -> Self {
        Self::Html(html)
    }
}

impl From<&str> for Payload {
    fn from(html: &str) -> Self {
        Self::Html(html.to_string())
    }
}

/// One unit of deferred content. Immutable once built.
#[derive(Debug, Clone)]
pub struct DeferredItem<S> {
    slot: S,
    payload: Payload,
    owner: String,
    arguments: Vec<Value>,
}

impl<S> DeferredItem<S> {
    pub fn new(
        slot: S,
        payload: impl Into<Payload>,
        owner: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            slot,
            payload: payload.into(),
            owner: owner.into(),
            arguments,
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Name of the extension that registered the item.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The item's HTML; callbacks are invoked with the stored arguments.
    pub fn render(&self) -> String {
        match &self.payload {
            Payload::Html(html) => html.clone(),
            Payload::Callback(callback) => callback(self.arguments.as_slice()),
        }
    }
}

impl<S> fmt::Display for DeferredItem<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Where in the generated HTML a snippet is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnippetLocation {
    StartOfHead,
    EndOfHead,
    AfterMeta,
    BeforeCss,
    AfterCss,
    BeforeJs,
    AfterJs,
    StartOfBody,
    EndOfBody,
    BeforeHtml,
    AfterHtml,
    /// A location the host defines itself.
    Custom(String),
}

impl SnippetLocation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StartOfHead => "startofhead",
            Self::EndOfHead => "endofhead",
            Self::AfterMeta => "aftermeta",
            Self::BeforeCss => "beforecss",
            Self::AfterCss => "aftercss",
            Self::BeforeJs => "beforejs",
            Self::AfterJs => "afterjs",
            Self::StartOfBody => "startofbody",
            Self::EndOfBody => "endofbody",
            Self::BeforeHtml => "beforehtml",
            Self::AfterHtml => "afterhtml",
            Self::Custom(name) => name,
        }
    }
}

impl FromStr for SnippetLocation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "startofhead" => Self::StartOfHead,
            "endofhead" => Self::EndOfHead,
            "aftermeta" => Self::AfterMeta,
            "beforecss" => Self::BeforeCss,
            "aftercss" => Self::AfterCss,
            "beforejs" => Self::BeforeJs,
            "afterjs" => Self::AfterJs,
            "startofbody" => Self::StartOfBody,
            "endofbody" => Self::EndOfBody,
            "beforehtml" => Self::BeforeHtml,
            "afterhtml" => Self::AfterHtml,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<&str> for SnippetLocation {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(location) => location,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for SnippetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the site a widget is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetZone {
    Frontend,
    Backend,
}

impl WidgetZone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }
}

impl FromStr for WidgetZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => Err(Error::UnknownWidgetZone(other.to_string())),
        }
    }
}

impl fmt::Display for WidgetZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Snippet = DeferredItem<SnippetLocation>;
pub type Widget = DeferredItem<WidgetZone>;

/// The two queues of one render pass, passed explicitly to whatever adds to
/// or reads from them.
#[derive(Debug, Default)]
pub struct RenderQueues {
    pub snippets: DeferredQueue<Snippet>,
    pub widgets: DeferredQueue<Widget>,
}

impl RenderQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered HTML of every queued snippet, in queue order.
    pub fn rendered_snippets(&self) -> Vec<String> {
        self.snippets.iter().map(Snippet::render).collect()
    }

    /// Queued snippets for one location, in queue order.
    pub fn snippets_at<'a>(
        &'a self,
        location: &'a SnippetLocation,
    ) -> impl Iterator<Item = &'a Snippet> + 'a {
        self.snippets
            .iter()
            .filter(move |snippet| snippet.slot() == location)
    }

    /// Queued widgets for one zone, in queue order.
    pub fn widgets_in(&self, zone: WidgetZone) -> impl Iterator<Item = &Widget> {
        self.widgets
            .iter()
            .filter(move |widget| *widget.slot() == zone)
    }

    /// End the pass: both queues are emptied.
    pub fn finish_pass(&mut self) {
        self.snippets.clear();
        self.widgets.clear();
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn html_payload_renders_verbatim() {
        let snippet = Snippet::new(SnippetLocation::EndOfHead, "<meta x>", "demo", vec![]);
        assert_eq!(snippet.render(), "<meta x>");
        assert_eq!(snippet.to_string(), "<meta x>");
        assert_eq!(snippet.owner(), "demo");
    }

    #[test]
    fn callback_receives_arguments() {
        let payload = Payload::callback(|args| {
            let names: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            format!("<p>{}</p>", names.join(","))
        });
        let snippet = Snippet::new(
            SnippetLocation::EndOfBody,
            payload,
            "demo",
            vec![json!(1), json!("two")],
        );
        assert_eq!(snippet.render(), r#"<p>1,"two"</p>"#);
        assert_eq!(snippet.arguments().len(), 2);
    }

    #[test]
    fn locations_parse_from_names() {
        assert_eq!(SnippetLocation::from("endofhead"), SnippetLocation::EndOfHead);
        assert_eq!(
            SnippetLocation::from("sidebar"),
            SnippetLocation::Custom("sidebar".into())
        );
        assert_eq!(SnippetLocation::AfterJs.to_string(), "afterjs");
    }

    #[test]
    fn widget_zone_rejects_unknown_names() {
        assert_eq!("backend".parse::<WidgetZone>().unwrap(), WidgetZone::Backend);
        let err = "sideways".parse::<WidgetZone>().unwrap_err();
        assert!(matches!(err, Error::UnknownWidgetZone(zone) if zone == "sideways"));
    }

    #[test]
    fn queues_filter_by_slot_and_finish_pass() {
        let mut queues = RenderQueues::new();
        queues
            .snippets
            .add(Snippet::new(SnippetLocation::EndOfHead, "a", "x", vec![]));
        queues
            .snippets
            .add(Snippet::new(SnippetLocation::EndOfBody, "b", "x", vec![]));
        queues
            .snippets
            .add(Snippet::new(SnippetLocation::EndOfHead, "c", "y", vec![]));
        queues
            .widgets
            .add(Widget::new(WidgetZone::Backend, "w", "x", vec![]));

        assert_eq!(queues.rendered_snippets(), ["a", "b", "c"]);
        let head: Vec<String> = queues
            .snippets_at(&SnippetLocation::EndOfHead)
            .map(Snippet::render)
            .collect();
        assert_eq!(head, ["a", "c"]);
        assert_eq!(queues.widgets_in(WidgetZone::Backend).count(), 1);
        assert_eq!(queues.widgets_in(WidgetZone::Frontend).count(), 0);

        queues.finish_pass();
        assert!(queues.snippets.is_empty());
        assert!(queues.widgets.is_empty());
    }
}

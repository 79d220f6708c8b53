//! site-graph: interactive link graph panel for static content sites.
//!
//! This crate provides a WASM-based panel that shows the pages around the one
//! being read, following links and tags from the site's content index, with a
//! global overlay for the whole site. Layouts are force-directed or one of
//! three hierarchy trees built from page paths.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Element, HtmlElement};

pub mod components;
pub mod config;
pub mod content;
pub mod graph;
pub mod layout;

pub use components::graph_canvas::{CanvasData, GraphCanvas, Theme};
pub use components::panel::GraphPanel;
pub use config::{ConfigError, GraphConfig, PanelConfig};
pub use content::{ContentError, ContentIndex, ContentIndexCache, ContentSource, PageId};

/// Id of the element the panel mounts into.
pub const MOUNT_ID: &str = "graph-container";

/// Where the content index is fetched from when the mount element names none.
pub const DEFAULT_INDEX_URL: &str = "/static/contentIndex.json";

const PANEL_CSS: &str = r#"
.graph-outer {
	position: relative;
	height: 250px;
	border: 1px solid var(--lightgray, #e5e5e5);
	border-radius: 5px;
	overflow: hidden;
}
.global-graph-icon {
	position: absolute;
	top: 0.25rem;
	right: 0.25rem;
	background: none;
	border: none;
	cursor: pointer;
	color: var(--dark, #2b2b2b);
	opacity: 0.5;
}
.global-graph-icon:hover {
	opacity: 1;
}
.global-graph-outer {
	position: fixed;
	inset: 0;
	z-index: 9999;
	background: rgba(0, 0, 0, 0.15);
	backdrop-filter: blur(4px);
}
.global-graph-container {
	position: absolute;
	top: 50%;
	left: 50%;
	transform: translate(-50%, -50%);
	width: 80vw;
	height: 80vh;
	border: 1px solid var(--lightgray, #e5e5e5);
	border-radius: 5px;
	background: var(--light, #faf8f8);
	overflow: hidden;
}
"#;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("site-graph: logging initialized");
}

/// Settings read from the mount element's `data-*` attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct MountOptions {
	pub config: PanelConfig,
	pub source: ContentSource,
	/// Initial focus page.
	pub slug: PageId,
	/// URL prefix of every page.
	pub base: String,
}

impl MountOptions {
	/// `attr` looks up a `data-*` attribute by its full name; `pathname` is
	/// the current URL path, used when `data-slug` is absent.
	pub fn from_attributes(attr: impl Fn(&str) -> Option<String>, pathname: &str) -> Self {
		let base = attr("data-base").unwrap_or_default();

		let config = match attr("data-cfg") {
			Some(json) => PanelConfig::from_json(&json).unwrap_or_else(|e| {
				warn!("site-graph: invalid graph config, using defaults: {e}");
				PanelConfig::defaults()
			}),
			None => PanelConfig::defaults(),
		};

		let source = match attr("data-index-id") {
			Some(id) => ContentSource::Inline(id),
			None => ContentSource::Url(
				attr("data-index-url").unwrap_or_else(|| DEFAULT_INDEX_URL.to_string()),
			),
		};

		let slug = match attr("data-slug") {
			Some(slug) => PageId::new(&slug),
			None => PageId::from_url_path(pathname, &base),
		};

		Self {
			config,
			source,
			slug,
			base,
		}
	}

	pub fn from_element(element: &Element) -> Self {
		let pathname = web_sys::window()
			.and_then(|w| w.location().pathname().ok())
			.unwrap_or_default();
		Self::from_attributes(|name| element.get_attribute(name), &pathname)
	}
}

/// Moves `focus` to the page named by every `nav` event on the document.
fn listen_for_navigation(focus: RwSignal<PageId>) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	let on_nav = Closure::<dyn FnMut(CustomEvent)>::new(move |ev: CustomEvent| {
		let url = js_sys::Reflect::get(&ev.detail(), &JsValue::from_str("url"))
			.ok()
			.and_then(|v| v.as_string());
		match url {
			Some(url) => {
				debug!("site-graph: nav to {url}");
				focus.set(PageId::new(&url));
			}
			None => warn!("site-graph: nav event without detail.url"),
		}
	});
	let _ = document.add_event_listener_with_callback("nav", on_nav.as_ref().unchecked_ref());
	on_nav.forget();
}

/// Main application component.
/// Follows navigation events and renders the graph panel for the focus page.
#[component]
pub fn App(options: MountOptions) -> impl IntoView {
	provide_meta_context();

	let focus = RwSignal::new(options.slug);
	listen_for_navigation(focus);
	let cache = ContentIndexCache::from_source(options.source);

	view! {
		<Style>{PANEL_CSS}</Style>
		<GraphPanel focus=focus config=options.config cache=cache base=options.base />
	}
}

/// Mounts the panel into the element with id `element_id`. Pages without one
/// are left alone.
pub fn mount(element_id: &str) {
	let element = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(element_id))
		.and_then(|el| el.dyn_into::<HtmlElement>().ok());
	let Some(element) = element else {
		info!("site-graph: no #{element_id} on this page, skipping");
		return;
	};

	let options = MountOptions::from_element(&element);
	info!("site-graph: mounting on #{element_id} for {}", options.slug);
	leptos::mount::mount_to(element, move || view! { <App options=options /> }).forget();
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::graph::Depth;
	use crate::layout::LayoutKind;

	fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| map.get(name).cloned()
	}

	#[test]
	fn bare_mount_uses_defaults() {
		let options = MountOptions::from_attributes(attrs(&[]), "/notes/Graph.html");
		assert_eq!(options.config, PanelConfig::defaults());
		assert_eq!(options.source, ContentSource::Url(DEFAULT_INDEX_URL.to_string()));
		assert_eq!(options.slug, PageId::new("notes/graph"));
		assert_eq!(options.base, "");
	}

	#[test]
	fn attributes_override() {
		let options = MountOptions::from_attributes(
			attrs(&[
				("data-cfg", r#"{"global": {"depth": 2, "radial": true}}"#),
				("data-index-id", "content-index"),
				("data-slug", "Notes/A"),
				("data-base", "/site"),
			]),
			"/site/ignored",
		);
		assert_eq!(options.config.global.depth, Depth::Hops(2));
		assert_eq!(options.config.global.layout, LayoutKind::RadialCluster);
		assert_eq!(options.source, ContentSource::Inline("content-index".to_string()));
		assert_eq!(options.slug, PageId::new("notes/a"));
		assert_eq!(options.base, "/site");
	}

	#[test]
	fn slug_from_path_respects_base() {
		let options = MountOptions::from_attributes(attrs(&[("data-base", "/site")]), "/site/");
		assert_eq!(options.slug, PageId::new("index"));
	}

	#[test]
	fn invalid_config_falls_back() {
		let options = MountOptions::from_attributes(attrs(&[("data-cfg", r#"{"scale": -1}"#)]), "/");
		assert_eq!(options.config, PanelConfig::defaults());
	}
}

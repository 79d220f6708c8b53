//! The graph panel: an inline local graph plus a global graph overlay.
//!
//! Both graphs are rebuilt whenever the focus page changes. The overlay is
//! toggled by its icon button, `Ctrl`/`Cmd`+`G`, and closed by `Escape` or a
//! click on the backdrop. Clicking a node navigates without reloading when
//! the host page allows it.

use js_sys::Reflect;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, KeyboardEvent, MouseEvent, Window};

use super::graph_canvas::{CanvasData, GraphCanvas};
use crate::config::{GraphConfig, PanelConfig};
use crate::content::{ContentIndexCache, LocalStorage, PageId, VisitedStore};

/// Loads the index and lays out the graph around `focus`, or `None` when the
/// index is unavailable.
async fn load_scene(cache: ContentIndexCache, focus: PageId, config: GraphConfig) -> Option<CanvasData> {
	match cache.get().await {
		Ok(index) => {
			let visited = VisitedStore::new(LocalStorage).load();
			let data = CanvasData::build(&index, &focus, &config, &visited);
			info!(
				"site-graph: rendered {} ({:?}) with {} nodes, {} edges",
				focus,
				config.layout,
				data.scene.nodes.len(),
				data.scene.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("site-graph: graph unavailable: {e}");
			None
		}
	}
}

/// Whether a scene loaded for `requested` may still be shown.
fn still_wanted(requested: &PageId, current: &PageId, open: bool) -> bool {
	open && requested == current
}

/// Ways of leaving the current page, in order of preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
	/// The host site's client-side router, `window.spa.navigate`.
	Router,
	/// `history.pushState` followed by a `nav` event.
	History,
	/// Full page load.
	Reload,
}

impl Route {
	const ORDER: [Route; 3] = [Route::Router, Route::History, Route::Reload];

	/// First route `attempt` accepts.
	fn first(mut attempt: impl FnMut(Route) -> bool) -> Option<Route> {
		Self::ORDER.into_iter().find(|route| attempt(*route))
	}
}

fn host_router(window: &Window) -> Option<(JsValue, js_sys::Function)> {
	let spa = Reflect::get(window, &JsValue::from_str("spa"))
		.ok()
		.filter(JsValue::is_object)?;
	let navigate = Reflect::get(&spa, &JsValue::from_str("navigate"))
		.ok()?
		.dyn_into::<js_sys::Function>()
		.ok()?;
	Some((spa, navigate))
}

/// Pushes `url` onto the history and announces `id` with a `nav` event.
fn push_and_announce(window: &Window, id: &PageId, url: &str) -> Result<(), JsValue> {
	window.history()?.push_state_with_url(&JsValue::NULL, "", Some(url))?;
	let detail = js_sys::Object::new();
	Reflect::set(&detail, &JsValue::from_str("url"), &JsValue::from_str(id.as_str()))?;
	let init = CustomEventInit::new();
	init.set_detail(&detail);
	let event = CustomEvent::new_with_event_init_dict("nav", &init)?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	document.dispatch_event(&event)?;
	Ok(())
}

/// Moves the browser to `id`'s page.
fn navigate(id: &PageId, base: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let url = id.url(base);
	let route = Route::first(|route| match route {
		Route::Router => host_router(&window)
			.is_some_and(|(spa, go)| go.call1(&spa, &JsValue::from_str(&url)).is_ok()),
		Route::History => push_and_announce(&window, id, &url)
			.map_err(|e| warn!("site-graph: history navigation failed: {e:?}"))
			.is_ok(),
		Route::Reload => window.location().set_href(&url).is_ok(),
	});
	debug!("site-graph: navigated to {url} via {route:?}");
}

/// Inline graph around `focus` with a button opening the global graph.
#[component]
pub fn GraphPanel(
	#[prop(into)] focus: Signal<PageId>,
	config: PanelConfig,
	cache: ContentIndexCache,
	#[prop(into, default = String::new())] base: String,
) -> impl IntoView {
	let local = RwSignal::new(None::<CanvasData>);
	let global = RwSignal::new(None::<CanvasData>);
	let global_open = RwSignal::new(false);
	let on_navigate = Callback::new(move |id: PageId| navigate(&id, &base));

	let (local_cache, local_cfg) = (cache.clone(), config.local.clone());
	Effect::new(move |_| {
		let id = focus.get();
		VisitedStore::new(LocalStorage).add(&id);
		let (cache, cfg) = (local_cache.clone(), local_cfg.clone());
		spawn_local(async move {
			let data = load_scene(cache, id.clone(), cfg).await;
			let current = focus.try_get_untracked();
			if current.is_some_and(|current| still_wanted(&id, &current, true)) {
				if let Some(data) = data {
					local.set(Some(data));
				}
			}
		});
	});

	let global_cfg = config.global.clone();
	Effect::new(move |_| {
		let id = focus.get();
		if !global_open.get() {
			global.set(None);
			return;
		}
		let (cache, cfg) = (cache.clone(), global_cfg.clone());
		spawn_local(async move {
			let data = load_scene(cache, id.clone(), cfg).await;
			let (current, open) = (focus.try_get_untracked(), global_open.try_get_untracked());
			if current.is_some_and(|current| still_wanted(&id, &current, open == Some(true))) {
				if let Some(data) = data {
					global.set(Some(data));
				}
			}
		});
	});

	let keys = window_event_listener(ev::keydown, move |e: KeyboardEvent| {
		if e.key() == "Escape" {
			global_open.set(false);
		} else if (e.ctrl_key() || e.meta_key()) && e.key().eq_ignore_ascii_case("g") {
			e.prevent_default();
			global_open.update(|open| *open = !*open);
		}
	});
	on_cleanup(move || keys.remove());

	let close_on_backdrop = move |e: MouseEvent| {
		if e.target() == e.current_target() {
			global_open.set(false);
		}
	};

	let local_canvas_cfg = StoredValue::new(config.local);
	let global_canvas_cfg = StoredValue::new(config.global);

	view! {
		<div class="graph">
			<div class="graph-outer">
				<Show when=move || local.with(Option::is_some)>
					<GraphCanvas
						data=Signal::derive(move || local.get().unwrap_or_default())
						config=local_canvas_cfg.get_value()
						on_navigate=on_navigate
					/>
				</Show>
				<button
					class="global-graph-icon"
					aria-label="Global Graph"
					on:click=move |_| global_open.set(true)
				>
					<svg viewBox="0 0 24 24" width="16" height="16" fill="none" stroke="currentColor">
						<circle cx="6" cy="6" r="2.5"></circle>
						<circle cx="18" cy="8" r="2.5"></circle>
						<circle cx="10" cy="18" r="2.5"></circle>
						<path d="M8 7 L16 8 M7 8 L9.5 16 M17 10 L12 16"></path>
					</svg>
				</button>
			</div>
			<Show when=move || global_open.get()>
				<div class="global-graph-outer" on:click=close_on_backdrop>
					<div class="global-graph-container">
						<Show when=move || global.with(Option::is_some)>
							<GraphCanvas
								data=Signal::derive(move || global.get().unwrap_or_default())
								config=global_canvas_cfg.get_value()
								on_navigate=on_navigate
							/>
						</Show>
					</div>
				</div>
			</Show>
		</div>
	}
}

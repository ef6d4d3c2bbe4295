#![forbid(unsafe_code)]

//! `wasm-bindgen` surface: page scanning, listener wiring, patch application.
//!
//! One instance of [`DiagramViewerWeb`] / [`QuizEnhancerWeb`] per page. Each
//! owns its controller, a node registry mapping [`NodeId`] handles to live
//! elements, and the listener closures it created. Listener closures are
//! created once at construction and kept for the page lifetime; attach and
//! detach (the lightbox key listener, the timer interval) only add or remove
//! them, so a closure is never dropped while the browser might still call it.
//!
//! Patch application failures are deliberately swallowed: a patch that
//! cannot apply means the corresponding enhancement silently does not
//! appear, matching the page contract of silent non-action.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent,
    MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use pagelift_diagram::{DiagramEvent, DiagramViewer};
use pagelift_dom::{
    ChoiceNode, CountdownSource, DiagramNode, DiagramSnapshot, DomPatch, FocusTarget, KeyCode,
    KeyInput, Modifiers, NodeId, PointerInput, PxSize, QuizSnapshot, TimerNode, classes,
};
use pagelift_quiz::{QuizEnhancer, QuizEvent};

use crate::scan_util::{parse_counter, parse_time_left, parse_total_time};

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Live-element registry. Scanner ids start at 1 (0 is the body).
#[derive(Debug, Default)]
struct NodeRegistry {
    elements: HashMap<NodeId, Element>,
    next_id: u32,
}

impl NodeRegistry {
    fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a scanned page element under a fresh id.
    fn register(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    /// Record a controller-created element under its controller-assigned id.
    fn insert(&mut self, id: NodeId, element: Element) {
        self.elements.insert(id, element);
    }

    /// First id free for the controller's allocator.
    const fn watermark(&self) -> u32 {
        self.next_id
    }
}

fn resolve(document: &Document, nodes: &RefCell<NodeRegistry>, id: NodeId) -> Option<Element> {
    if id == NodeId::BODY {
        return document.body().map(Element::from);
    }
    nodes.borrow().elements.get(&id).cloned()
}

/// Apply one patch. [`DomPatch::KeyListener`] is handled by the caller (it
/// needs the controller-specific listener closure) and is a no-op here.
fn apply_patch(
    document: &Document,
    nodes: &RefCell<NodeRegistry>,
    patch: &DomPatch,
) -> Result<(), JsValue> {
    match patch {
        DomPatch::Create {
            node,
            tag,
            class,
            parent,
            text,
        } => {
            let el = document.create_element(tag)?;
            if !class.is_empty() {
                el.set_class_name(class);
            }
            if let Some(text) = text {
                el.set_text_content(Some(text));
            }
            if let Some(parent) = resolve(document, nodes, *parent) {
                parent.append_child(&el)?;
            }
            nodes.borrow_mut().insert(*node, el);
        }
        DomPatch::Wrap {
            node,
            wrapper,
            class,
        } => {
            let Some(target) = resolve(document, nodes, *node) else {
                return Ok(());
            };
            let wrap_el = document.create_element("div")?;
            wrap_el.set_class_name(class);
            let target_node: &web_sys::Node = target.as_ref();
            if let Some(parent) = target.parent_node() {
                parent.insert_before(&wrap_el, Some(target_node))?;
            }
            wrap_el.append_child(target_node)?;
            nodes.borrow_mut().insert(*wrapper, wrap_el);
        }
        DomPatch::Remove { node } => {
            if let Some(el) = resolve(document, nodes, *node) {
                el.remove();
            }
        }
        DomPatch::RemoveAfter { node, delay_ms } => {
            let Some(el) = resolve(document, nodes, *node) else {
                return Ok(());
            };
            let callback = Closure::once_into_js(move || el.remove());
            window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                *delay_ms as i32,
            )?;
        }
        DomPatch::AddClass { node, class } => {
            if let Some(el) = resolve(document, nodes, *node) {
                el.class_list().add_1(class)?;
            }
        }
        DomPatch::RemoveClass { node, class } => {
            if let Some(el) = resolve(document, nodes, *node) {
                el.class_list().remove_1(class)?;
            }
        }
        DomPatch::SetStyle {
            node,
            property,
            value,
        } => {
            if let Some(el) = resolve(document, nodes, *node)
                && let Some(html) = el.dyn_ref::<HtmlElement>()
            {
                html.style().set_property(property, value)?;
            }
        }
        DomPatch::SetAttr { node, name, value } => {
            if let Some(el) = resolve(document, nodes, *node) {
                el.set_attribute(name, value)?;
            }
        }
        DomPatch::SetText { node, text } => {
            if let Some(el) = resolve(document, nodes, *node) {
                el.set_text_content(Some(text));
            }
        }
        DomPatch::SetChecked { node, checked } => {
            if let Some(el) = resolve(document, nodes, *node)
                && let Some(input) = el.dyn_ref::<HtmlInputElement>()
            {
                input.set_checked(*checked);
            }
        }
        DomPatch::ScrollIntoView { node } => {
            if let Some(el) = resolve(document, nodes, *node) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Center);
                el.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        DomPatch::SubmitForm { node } => {
            if let Some(el) = resolve(document, nodes, *node)
                && let Some(html) = el.dyn_ref::<HtmlElement>()
            {
                html.click();
            }
        }
        DomPatch::AppendHiddenInput { form, name, value } => {
            let Some(form_el) = resolve(document, nodes, *form) else {
                return Ok(());
            };
            let input = document.create_element("input")?;
            input.set_attribute("type", "hidden")?;
            input.set_attribute("name", name)?;
            input.set_attribute("value", value)?;
            form_el.append_child(&input)?;
        }
        DomPatch::SetPageScroll { locked } => {
            if let Some(body) = document.body() {
                if *locked {
                    body.style().set_property("overflow", "hidden")?;
                } else {
                    body.style().remove_property("overflow")?;
                }
            }
        }
        DomPatch::KeyListener { .. } => {}
    }
    Ok(())
}

fn key_input_from(event: &KeyboardEvent, document: &Document) -> KeyInput {
    let mut mods = Modifiers::empty();
    if event.shift_key() {
        mods |= Modifiers::SHIFT;
    }
    if event.alt_key() {
        mods |= Modifiers::ALT;
    }
    if event.ctrl_key() {
        mods |= Modifiers::CTRL;
    }
    if event.meta_key() {
        mods |= Modifiers::SUPER;
    }
    let focus = document
        .active_element()
        .map(|el| FocusTarget::from_tag_name(&el.tag_name()))
        .unwrap_or(FocusTarget::Other);
    KeyInput {
        code: KeyCode::from_dom_key(&event.key()),
        mods,
        focus,
    }
}

type EventClosure = Closure<dyn FnMut(Event)>;

fn listen(
    listeners: &RefCell<Vec<EventClosure>>,
    target: &web_sys::EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) {
    let closure = EventClosure::new(handler);
    let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    listeners.borrow_mut().push(closure);
}

/// Scan the current document and return the diagram snapshot as JSON.
///
/// For recording real-page scans as native test fixtures; does not enhance
/// anything.
#[wasm_bindgen(js_name = scanDiagramSnapshot)]
pub fn scan_diagram_snapshot() -> Result<String, JsValue> {
    let document = document()?;
    let mut nodes = NodeRegistry::new();
    let snapshot = scan_diagrams(&document, &mut nodes)?;
    serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Scan the current document and return the quiz snapshot as JSON.
///
/// For recording real-page scans as native test fixtures; does not enhance
/// anything.
#[wasm_bindgen(js_name = scanQuizSnapshot)]
pub fn scan_quiz_snapshot() -> Result<String, JsValue> {
    let document = document()?;
    let mut nodes = NodeRegistry::new();
    let snapshot = scan_quiz(&document, &mut nodes)?;
    serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
}

// ---------------------------------------------------------------------------
// Diagram viewer
// ---------------------------------------------------------------------------

struct DiagramHost {
    viewer: RefCell<DiagramViewer>,
    nodes: RefCell<NodeRegistry>,
    document: Document,
    listeners: RefCell<Vec<EventClosure>>,
    /// Created once; added/removed from the document as the lightbox
    /// opens/closes so the listener lifetime stays bounded by visibility.
    key_closure: RefCell<Option<EventClosure>>,
    key_attached: RefCell<bool>,
}

fn diagram_dispatch(host: &Rc<DiagramHost>, event: DiagramEvent) {
    let patches = host.viewer.borrow_mut().handle(event);
    diagram_apply(host, &patches);
}

fn diagram_apply(host: &Rc<DiagramHost>, patches: &[DomPatch]) {
    for patch in patches {
        match patch {
            DomPatch::KeyListener { attach } => set_key_listener(host, *attach),
            other => {
                let _ = apply_patch(&host.document, &host.nodes, other);
            }
        }
    }
}

fn set_key_listener(host: &Rc<DiagramHost>, attach: bool) {
    if host.key_closure.borrow().is_none() {
        let weak = Rc::downgrade(host);
        let closure = EventClosure::new(move |event: Event| {
            let Some(host) = weak.upgrade() else { return };
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let input = key_input_from(key, &host.document);
            diagram_dispatch(&host, DiagramEvent::Key(input));
        });
        *host.key_closure.borrow_mut() = Some(closure);
    }
    let mut attached = host.key_attached.borrow_mut();
    if attach == *attached {
        return;
    }
    let key_closure = host.key_closure.borrow();
    let Some(closure) = key_closure.as_ref() else {
        return;
    };
    let callback = closure.as_ref().unchecked_ref();
    if attach {
        let _ = host
            .document
            .add_event_listener_with_callback("keydown", callback);
    } else {
        let _ = host
            .document
            .remove_event_listener_with_callback("keydown", callback);
    }
    *attached = attach;
}

fn scan_diagrams(
    document: &Document,
    nodes: &mut NodeRegistry,
) -> Result<DiagramSnapshot, JsValue> {
    let mut diagrams = Vec::new();
    let selector = format!(".{} img", classes::DIAGRAM_CONTAINER);
    let images = document.query_selector_all(&selector)?;
    for index in 0..images.length() {
        let Some(node) = images.item(index) else {
            continue;
        };
        let Ok(image) = node.dyn_into::<HtmlImageElement>() else {
            continue;
        };

        let container = image.parent_element().filter(|parent| {
            parent.class_list().contains(classes::DIAGRAM_CONTAINER)
        });
        let has_caption = match &container {
            Some(parent) => parent
                .query_selector(&format!(".{}", classes::DIAGRAM_CAPTION))?
                .is_some(),
            None => false,
        };
        let rendered = (image.width() > 0 && image.height() > 0)
            .then(|| PxSize::new(image.width(), image.height()));
        let natural = PxSize::new(image.natural_width(), image.natural_height());
        let description = image.get_attribute("data-description");
        let src = image.src();
        let alt = image.alt();

        let container_id = container.map(|parent| nodes.register(parent));
        let image_id = nodes.register(image.into());
        diagrams.push(DiagramNode {
            image: image_id,
            container: container_id,
            src,
            alt,
            description,
            rendered,
            natural,
            has_caption,
        });
    }
    Ok(DiagramSnapshot {
        diagrams,
        node_watermark: nodes.watermark(),
    })
}

fn wire_diagrams(host: &Rc<DiagramHost>, snapshot: &DiagramSnapshot) {
    for diagram in &snapshot.diagrams {
        let image_id = diagram.image;
        if let Some(image_el) = resolve(&host.document, &host.nodes, image_id) {
            let weak = Rc::downgrade(host);
            listen(&host.listeners, &image_el, "click", move |_| {
                if let Some(host) = weak.upgrade() {
                    diagram_dispatch(&host, DiagramEvent::ImageClicked { image: image_id });
                }
            });
        }

        // Tooltip tracking attaches to the container (original markup or the
        // wrapper the controller just created).
        let viewer = host.viewer.borrow();
        let container = viewer
            .has_tooltip(image_id)
            .then(|| viewer.container_of(image_id))
            .flatten();
        drop(viewer);
        if let Some(container_id) = container
            && let Some(container_el) = resolve(&host.document, &host.nodes, container_id)
        {
            let weak = Rc::downgrade(host);
            listen(&host.listeners, &container_el, "mouseenter", move |_| {
                if let Some(host) = weak.upgrade() {
                    diagram_dispatch(&host, DiagramEvent::PointerEntered { image: image_id });
                }
            });
            let weak = Rc::downgrade(host);
            listen(&host.listeners, &container_el, "mouseleave", move |_| {
                if let Some(host) = weak.upgrade() {
                    diagram_dispatch(&host, DiagramEvent::PointerLeft { image: image_id });
                }
            });
            let weak = Rc::downgrade(host);
            let track_el = container_el.clone();
            listen(&host.listeners, &container_el, "mousemove", move |event| {
                let (Some(host), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>())
                else {
                    return;
                };
                let (left, top) = match track_el.dyn_ref::<HtmlElement>() {
                    Some(html) => (html.offset_left(), html.offset_top()),
                    None => (0, 0),
                };
                diagram_dispatch(
                    &host,
                    DiagramEvent::PointerMoved {
                        image: image_id,
                        x: f64::from(mouse.page_x() - left),
                        y: f64::from(mouse.page_y() - top),
                    },
                );
            });
        }
    }

    let bindings: Vec<_> = host.viewer.borrow().bindings().to_vec();
    for binding in bindings {
        let Some(button) = resolve(&host.document, &host.nodes, binding.node) else {
            continue;
        };
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &button, "click", move |event| {
            event.stop_propagation();
            if let Some(host) = weak.upgrade() {
                diagram_dispatch(
                    &host,
                    DiagramEvent::ControlClicked {
                        image: binding.image,
                        control: binding.control,
                    },
                );
            }
        });
    }

    let (overlay_id, close_id) = {
        let viewer = host.viewer.borrow();
        (viewer.lightbox().overlay(), viewer.lightbox().close_button())
    };
    if let Some(overlay) = resolve(&host.document, &host.nodes, overlay_id) {
        let weak = Rc::downgrade(host);
        let backdrop = overlay.clone();
        listen(&host.listeners, &overlay, "click", move |event| {
            // Only clicks on the backdrop itself close; clicks on the
            // content bubble up here with a different target.
            let on_backdrop = event
                .target()
                .is_some_and(|t| t.dyn_ref::<Element>() == Some(&backdrop));
            if on_backdrop && let Some(host) = weak.upgrade() {
                diagram_dispatch(&host, DiagramEvent::BackdropClicked);
            }
        });
    }
    if let Some(close) = resolve(&host.document, &host.nodes, close_id) {
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &close, "click", move |_| {
            if let Some(host) = weak.upgrade() {
                diagram_dispatch(&host, DiagramEvent::CloseClicked);
            }
        });
    }
}

/// Web entry point for the diagram viewer.
#[wasm_bindgen]
pub struct DiagramViewerWeb {
    host: Rc<DiagramHost>,
}

#[wasm_bindgen]
impl DiagramViewerWeb {
    /// Scan the current document and enhance every diagram in it.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DiagramViewerWeb, JsValue> {
        let document = document()?;
        let mut nodes = NodeRegistry::new();
        let snapshot = scan_diagrams(&document, &mut nodes)?;
        let (viewer, patches) = DiagramViewer::new(&snapshot);

        let host = Rc::new(DiagramHost {
            viewer: RefCell::new(viewer),
            nodes: RefCell::new(nodes),
            document,
            listeners: RefCell::new(Vec::new()),
            key_closure: RefCell::new(None),
            key_attached: RefCell::new(false),
        });
        diagram_apply(&host, &patches);
        wire_diagrams(&host, &snapshot);
        Ok(Self { host })
    }

    /// Number of diagrams under management.
    #[wasm_bindgen(js_name = diagramCount)]
    pub fn diagram_count(&self) -> u32 {
        self.host.viewer.borrow().images().count() as u32
    }

    /// Explicit teardown: closes the lightbox and detaches the document key
    /// listener. Element-level listeners die with the page.
    pub fn destroy(&self) {
        diagram_dispatch(&self.host, DiagramEvent::CloseClicked);
        set_key_listener(&self.host, false);
    }
}

// ---------------------------------------------------------------------------
// Quiz enhancer
// ---------------------------------------------------------------------------

/// Countdown collaborator backed by the timer element's displayed text.
struct DomCountdown {
    element: Option<Element>,
}

impl CountdownSource for DomCountdown {
    fn time_left(&self) -> Option<i64> {
        let text = self.element.as_ref()?.text_content()?;
        parse_time_left(Some(text.as_str()))
    }
}

struct QuizHost {
    enhancer: RefCell<QuizEnhancer>,
    nodes: RefCell<NodeRegistry>,
    document: Document,
    listeners: RefCell<Vec<EventClosure>>,
    countdown: DomCountdown,
    /// Tick closure outlives the interval so clearing the interval from
    /// inside a tick never drops a running closure.
    tick_closure: RefCell<Option<Closure<dyn FnMut()>>>,
    interval_id: RefCell<Option<i32>>,
}

fn quiz_dispatch(host: &Rc<QuizHost>, event: QuizEvent) {
    let patches = host.enhancer.borrow_mut().handle(event);
    for patch in &patches {
        let _ = apply_patch(&host.document, &host.nodes, patch);
    }
}

fn quiz_tick(host: &Rc<QuizHost>) {
    let Some(time_left) = host.countdown.time_left() else {
        return;
    };
    quiz_dispatch(host, QuizEvent::TimerTick { time_left });
    if host.enhancer.borrow().timer_done()
        && let Some(id) = host.interval_id.borrow_mut().take()
        && let Ok(window) = window()
    {
        window.clear_interval_with_handle(id);
    }
}

fn scan_quiz(document: &Document, nodes: &mut NodeRegistry) -> Result<QuizSnapshot, JsValue> {
    let form = document.query_selector(&format!(".{}", classes::QUESTION_FORM))?;
    let submit_button = match &form {
        Some(form) => form.query_selector("button[type=\"submit\"]")?,
        None => None,
    };

    let mut choices = Vec::new();
    let inputs = document.query_selector_all(&format!(".{}", classes::CHOICE_INPUT))?;
    for index in 0..inputs.length() {
        let Some(node) = inputs.item(index) else {
            continue;
        };
        let Ok(input) = node.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let label = match input.id().as_str() {
            "" => None,
            id => document.query_selector(&format!("label[for=\"{id}\"]"))?,
        };
        let checked = input.checked();
        let input_id = nodes.register(input.into());
        let label_id = label.map(|l| nodes.register(l));
        choices.push(ChoiceNode {
            input: input_id,
            label: label_id,
            checked,
        });
    }

    let timer_el = document.query_selector(&format!(".{}", classes::QUIZ_TIMER))?;
    let bar_el = document.query_selector(&format!(".{}", classes::TIMER_BAR))?;
    let timer = match (&timer_el, bar_el) {
        (Some(timer), Some(bar)) => {
            let total_time = parse_total_time(timer.get_attribute("data-total-time").as_deref());
            Some(TimerNode {
                element: nodes.register(timer.clone()),
                bar: nodes.register(bar),
                total_time,
            })
        }
        _ => None,
    };

    let (current_question, total_questions, form_id) = match &form {
        Some(form) => (
            parse_counter(form.get_attribute("data-current-question").as_deref()),
            parse_counter(form.get_attribute("data-total-questions").as_deref()),
            Some(nodes.register(form.clone())),
        ),
        None => (0, 0, None),
    };
    let submit_id = submit_button.map(|b| nodes.register(b));

    Ok(QuizSnapshot {
        form: form_id,
        submit_button: submit_id,
        choices,
        timer,
        current_question,
        total_questions,
        node_watermark: nodes.watermark(),
    })
}

fn wire_quiz(host: &Rc<QuizHost>, snapshot: &QuizSnapshot) {
    if let Some(form_id) = snapshot.form
        && let Some(form_el) = resolve(&host.document, &host.nodes, form_id)
    {
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &form_el, "submit", move |_| {
            if let Some(host) = weak.upgrade() {
                quiz_dispatch(&host, QuizEvent::SubmitIntent);
            }
        });
    }

    for choice in &snapshot.choices {
        let input_id = choice.input;
        if let Some(input_el) = resolve(&host.document, &host.nodes, input_id) {
            let weak = Rc::downgrade(host);
            listen(&host.listeners, &input_el, "change", move |_| {
                if let Some(host) = weak.upgrade() {
                    quiz_dispatch(&host, QuizEvent::ChoiceChanged { input: input_id });
                }
            });
        }

        let Some(label_id) = choice.label else {
            continue;
        };
        let Some(label_el) = resolve(&host.document, &host.nodes, label_id) else {
            continue;
        };
        let weak = Rc::downgrade(host);
        let rect_el = label_el.clone();
        listen(&host.listeners, &label_el, "mousedown", move |event| {
            let (Some(host), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            let rect = rect_el.get_bounding_client_rect();
            quiz_dispatch(
                &host,
                QuizEvent::ChoicePressed {
                    label: label_id,
                    pointer: PointerInput {
                        x: f64::from(mouse.client_x()) - rect.left(),
                        y: f64::from(mouse.client_y()) - rect.top(),
                        width: rect.width(),
                        height: rect.height(),
                    },
                },
            );
        });
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &label_el, "mouseenter", move |_| {
            if let Some(host) = weak.upgrade() {
                quiz_dispatch(&host, QuizEvent::PointerEntered { label: label_id });
            }
        });
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &label_el, "mouseleave", move |_| {
            if let Some(host) = weak.upgrade() {
                quiz_dispatch(&host, QuizEvent::PointerLeft { label: label_id });
            }
        });
    }

    // Keyboard navigation only exists on question pages.
    if !snapshot.choices.is_empty() {
        let weak = Rc::downgrade(host);
        listen(&host.listeners, &host.document, "keydown", move |event| {
            let (Some(host), Some(key)) = (weak.upgrade(), event.dyn_ref::<KeyboardEvent>())
            else {
                return;
            };
            let input = key_input_from(key, &host.document);
            quiz_dispatch(&host, QuizEvent::Key(input));
        });
    }
}

fn start_timer_interval(host: &Rc<QuizHost>) -> Result<(), JsValue> {
    let weak = Rc::downgrade(host);
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(host) = weak.upgrade() {
            quiz_tick(&host);
        }
    });
    let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        1000,
    )?;
    *host.tick_closure.borrow_mut() = Some(closure);
    *host.interval_id.borrow_mut() = Some(id);
    Ok(())
}

/// Web entry point for the quiz enhancer.
#[wasm_bindgen]
pub struct QuizEnhancerWeb {
    host: Rc<QuizHost>,
}

#[wasm_bindgen]
impl QuizEnhancerWeb {
    /// Scan the current document and enhance the quiz page in it.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<QuizEnhancerWeb, JsValue> {
        let document = document()?;
        let mut nodes = NodeRegistry::new();
        let snapshot = scan_quiz(&document, &mut nodes)?;

        let countdown = DomCountdown {
            element: snapshot
                .timer
                .and_then(|t| nodes.elements.get(&t.element).cloned()),
        };
        let (enhancer, patches) = QuizEnhancer::new(&snapshot);

        let host = Rc::new(QuizHost {
            enhancer: RefCell::new(enhancer),
            nodes: RefCell::new(nodes),
            document,
            listeners: RefCell::new(Vec::new()),
            countdown,
            tick_closure: RefCell::new(None),
            interval_id: RefCell::new(None),
        });
        for patch in &patches {
            let _ = apply_patch(&host.document, &host.nodes, patch);
        }
        wire_quiz(&host, &snapshot);
        if snapshot.timer.is_some() {
            start_timer_interval(&host)?;
        }
        Ok(Self { host })
    }

    /// Whether the countdown animation has stopped.
    #[wasm_bindgen(js_name = timerDone)]
    pub fn timer_done(&self) -> bool {
        self.host.enhancer.borrow().timer_done()
    }

    /// Explicit teardown: stops the timer interval. Element-level listeners
    /// die with the page.
    pub fn destroy(&self) {
        if let Some(id) = self.host.interval_id.borrow_mut().take()
            && let Ok(window) = window()
        {
            window.clear_interval_with_handle(id);
        }
    }
}

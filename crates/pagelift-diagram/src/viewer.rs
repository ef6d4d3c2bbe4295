#![forbid(unsafe_code)]

//! The `DiagramViewer` controller.
//!
//! Initialization wraps every discovered image in a container (when the
//! markup does not already provide one), attaches the control bar and
//! caption, and records the original dimensions. All per-image state lives
//! in controller-owned records keyed by [`NodeId`]; nothing is stashed in
//! DOM attributes.
//!
//! Zoom arithmetic reads the current size as whole pixels before scaling,
//! so zoom-in followed by zoom-out does not necessarily restore the
//! original size. Reset does, exactly, from the captured record. There is
//! no clamp in either direction.

use std::collections::HashMap;

use tracing::debug;

use pagelift_dom::classes;
use pagelift_dom::{DiagramSnapshot, DomPatch, IdAllocator, NodeId, PxSize};

use crate::event::{Control, DiagramEvent};
use crate::lightbox::Lightbox;

/// Scale factor applied by the zoom-in control.
pub const ZOOM_IN_FACTOR: f64 = 1.2;
/// Scale factor applied by the zoom-out control.
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Fixed margin between the pointer and the tooltip, in pixels.
const TOOLTIP_OFFSET_PX: f64 = 10.0;

/// Per-image state record.
#[derive(Debug)]
struct DiagramRecord {
    container: NodeId,
    src: String,
    alt: String,
    /// Captured once at initialization; never overwritten by zoom.
    original: PxSize,
    /// Current rendered size, as last written to the page.
    width: f64,
    height: f64,
    tooltip: Option<NodeId>,
}

/// A created control-bar button the host must wire a click listener to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBinding {
    pub image: NodeId,
    pub control: Control,
    pub node: NodeId,
}

/// Host-driven controller for all diagrams on one page.
#[derive(Debug)]
pub struct DiagramViewer {
    records: HashMap<NodeId, DiagramRecord>,
    bindings: Vec<ControlBinding>,
    lightbox: Lightbox,
    ids: IdAllocator,
}

impl DiagramViewer {
    /// Build the viewer from a page scan.
    ///
    /// Returns the initialization patch batch: container wrapping, control
    /// bars, captions, tooltips, and the hidden lightbox overlay.
    #[must_use]
    pub fn new(snapshot: &DiagramSnapshot) -> (Self, Vec<DomPatch>) {
        // Id 0 is the body; scanner ids start at 1 even on an empty page.
        let mut ids = IdAllocator::starting_at(snapshot.node_watermark.max(1));
        let mut patches = Vec::new();
        let lightbox = Lightbox::build(&mut ids, &mut patches);

        let mut viewer = Self {
            records: HashMap::new(),
            bindings: Vec::new(),
            lightbox,
            ids,
        };
        viewer.attach(snapshot, &mut patches);
        (viewer, patches)
    }

    /// Initialize every diagram in `snapshot` that does not already have a
    /// record. Already-initialized images are skipped, so running this twice
    /// never duplicates controls.
    pub fn attach(&mut self, snapshot: &DiagramSnapshot, patches: &mut Vec<DomPatch>) {
        let mut attached = 0usize;
        for diagram in &snapshot.diagrams {
            if self.records.contains_key(&diagram.image) {
                debug!(image = %diagram.image, "diagram already initialized, skipping");
                continue;
            }

            let container = diagram.container.unwrap_or_else(|| {
                let wrapper = self.ids.alloc();
                patches.push(DomPatch::Wrap {
                    node: diagram.image,
                    wrapper,
                    class: classes::DIAGRAM_CONTAINER.into(),
                });
                wrapper
            });

            self.add_controls(diagram.image, container, patches);

            if !diagram.alt.is_empty() && !diagram.has_caption {
                let caption = self.ids.alloc();
                patches.push(DomPatch::Create {
                    node: caption,
                    tag: "div".into(),
                    class: classes::DIAGRAM_CAPTION.into(),
                    parent: container,
                    text: Some(diagram.alt.clone()),
                });
            }

            let tooltip = diagram.description.as_ref().map(|text| {
                let tooltip = self.ids.alloc();
                patches.push(DomPatch::Create {
                    node: tooltip,
                    tag: "div".into(),
                    class: classes::DIAGRAM_TOOLTIP.into(),
                    parent: container,
                    text: Some(text.clone()),
                });
                tooltip
            });

            let original = diagram.effective_size();
            self.records.insert(
                diagram.image,
                DiagramRecord {
                    container,
                    src: diagram.src.clone(),
                    alt: diagram.alt.clone(),
                    original,
                    width: f64::from(original.width),
                    height: f64::from(original.height),
                    tooltip,
                },
            );
            attached += 1;
        }
        debug!(attached, total = snapshot.diagrams.len(), "diagram viewer attached");
    }

    fn add_controls(&mut self, image: NodeId, container: NodeId, patches: &mut Vec<DomPatch>) {
        let controls = self.ids.alloc();
        patches.push(DomPatch::Create {
            node: controls,
            tag: "div".into(),
            class: classes::DIAGRAM_CONTROLS.into(),
            parent: container,
            text: None,
        });

        let buttons = [
            (Control::ZoomIn, classes::ZOOM_IN_BTN, "+", "Zoom In"),
            (Control::ZoomOut, classes::ZOOM_OUT_BTN, "\u{2212}", "Zoom Out"),
            (Control::Reset, classes::RESET_BTN, "\u{27f2}", "Reset View"),
            (
                Control::Fullscreen,
                classes::FULLSCREEN_BTN,
                "\u{26f6}",
                "Fullscreen View",
            ),
        ];
        for (control, class, glyph, title) in buttons {
            let node = self.ids.alloc();
            patches.push(DomPatch::Create {
                node,
                tag: "button".into(),
                class: class.into(),
                parent: controls,
                text: Some(glyph.into()),
            });
            patches.push(DomPatch::SetAttr {
                node,
                name: "title".into(),
                value: title.into(),
            });
            self.bindings.push(ControlBinding {
                image,
                control,
                node,
            });
        }
    }

    /// Created control buttons the host must wire click listeners to.
    #[must_use]
    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    /// The shared overlay (the host wires backdrop/close-button clicks).
    #[must_use]
    pub const fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Images with a live record, in no particular order.
    pub fn images(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.records.keys().copied()
    }

    /// The container of an initialized image (the host wires pointer
    /// listeners for tooltips here).
    #[must_use]
    pub fn container_of(&self, image: NodeId) -> Option<NodeId> {
        self.records.get(&image).map(|r| r.container)
    }

    /// Whether an image carries a tooltip.
    #[must_use]
    pub fn has_tooltip(&self, image: NodeId) -> bool {
        self.tooltip_of(image).is_some()
    }

    /// Handle one normalized event.
    #[must_use]
    pub fn handle(&mut self, event: DiagramEvent) -> Vec<DomPatch> {
        let mut patches = Vec::new();
        match event {
            DiagramEvent::ImageClicked { image } => self.open_lightbox(image, &mut patches),
            DiagramEvent::ControlClicked { image, control } => match control {
                Control::ZoomIn => self.zoom(image, ZOOM_IN_FACTOR, &mut patches),
                Control::ZoomOut => self.zoom(image, ZOOM_OUT_FACTOR, &mut patches),
                Control::Reset => self.reset(image, &mut patches),
                Control::Fullscreen => self.open_lightbox(image, &mut patches),
            },
            DiagramEvent::BackdropClicked | DiagramEvent::CloseClicked => {
                self.lightbox.close(&mut patches);
            }
            DiagramEvent::Key(key) => {
                if self.lightbox.is_open() && key.code == pagelift_dom::KeyCode::Escape {
                    self.lightbox.close(&mut patches);
                }
            }
            DiagramEvent::PointerEntered { image } => {
                if let Some(tooltip) = self.tooltip_of(image) {
                    patches.push(DomPatch::set_style(tooltip, classes::STYLE_DISPLAY, "block"));
                }
            }
            DiagramEvent::PointerMoved { image, x, y } => {
                if let Some(tooltip) = self.tooltip_of(image) {
                    patches.push(DomPatch::set_style(
                        tooltip,
                        classes::STYLE_LEFT,
                        format!("{}px", x + TOOLTIP_OFFSET_PX),
                    ));
                    patches.push(DomPatch::set_style(
                        tooltip,
                        classes::STYLE_TOP,
                        format!("{}px", y + TOOLTIP_OFFSET_PX),
                    ));
                }
            }
            DiagramEvent::PointerLeft { image } => {
                if let Some(tooltip) = self.tooltip_of(image) {
                    patches.push(DomPatch::set_style(tooltip, classes::STYLE_DISPLAY, "none"));
                }
            }
        }
        patches
    }

    /// Scale an image's rendered size by `factor`.
    ///
    /// The current size is truncated to whole pixels first, reproducing the
    /// page's integer readback; this is what makes x1.2 followed by x0.8
    /// non-invertible. Unknown images are ignored.
    pub fn zoom(&mut self, image: NodeId, factor: f64, patches: &mut Vec<DomPatch>) {
        let Some(record) = self.records.get_mut(&image) else {
            return;
        };
        record.width = record.width.trunc() * factor;
        record.height = record.height.trunc() * factor;
        patches.push(DomPatch::set_style(
            image,
            classes::STYLE_WIDTH,
            format!("{}px", record.width),
        ));
        patches.push(DomPatch::set_style(
            image,
            classes::STYLE_HEIGHT,
            format!("{}px", record.height),
        ));
    }

    /// Restore an image to its captured original size and clear any
    /// translation transform.
    pub fn reset(&mut self, image: NodeId, patches: &mut Vec<DomPatch>) {
        let Some(record) = self.records.get_mut(&image) else {
            return;
        };
        record.width = f64::from(record.original.width);
        record.height = f64::from(record.original.height);
        patches.push(DomPatch::set_style(
            image,
            classes::STYLE_WIDTH,
            format!("{}px", record.original.width),
        ));
        patches.push(DomPatch::set_style(
            image,
            classes::STYLE_HEIGHT,
            format!("{}px", record.original.height),
        ));
        patches.push(DomPatch::set_style(
            image,
            classes::STYLE_TRANSFORM,
            "translate(0, 0)",
        ));
    }

    /// Current rendered size of an image, as last written.
    #[must_use]
    pub fn current_size(&self, image: NodeId) -> Option<(f64, f64)> {
        self.records.get(&image).map(|r| (r.width, r.height))
    }

    fn open_lightbox(&mut self, image: NodeId, patches: &mut Vec<DomPatch>) {
        let Some(record) = self.records.get(&image) else {
            return;
        };
        let (src, alt) = (record.src.clone(), record.alt.clone());
        debug!(image = %image, "opening lightbox");
        self.lightbox.open(&src, &alt, patches);
    }

    fn tooltip_of(&self, image: NodeId) -> Option<NodeId> {
        self.records.get(&image).and_then(|r| r.tooltip)
    }
}

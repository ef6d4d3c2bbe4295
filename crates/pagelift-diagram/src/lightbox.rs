#![forbid(unsafe_code)]

//! The shared lightbox overlay.
//!
//! Built exactly once when the viewer is constructed and reused for every
//! diagram on the page. Open/close operate on the owned value; nothing ever
//! looks the overlay up again.
//!
//! Opening locks page scrolling and attaches the document key listener;
//! closing reverses both. The listener lifetime is therefore bounded by
//! overlay visibility.

use tracing::debug;

use pagelift_dom::classes;
use pagelift_dom::{DomPatch, IdAllocator, NodeId};

/// Controller-owned singleton overlay.
#[derive(Debug)]
pub struct Lightbox {
    overlay: NodeId,
    content: NodeId,
    image: NodeId,
    caption: NodeId,
    close: NodeId,
    open: bool,
}

impl Lightbox {
    /// Build the overlay structure, hidden, appended to the page body.
    #[must_use]
    pub fn build(ids: &mut IdAllocator, patches: &mut Vec<DomPatch>) -> Self {
        let overlay = ids.alloc();
        let content = ids.alloc();
        let image = ids.alloc();
        let caption = ids.alloc();
        let close = ids.alloc();

        patches.push(DomPatch::Create {
            node: overlay,
            tag: "div".into(),
            class: classes::DIAGRAM_LIGHTBOX.into(),
            parent: NodeId::BODY,
            text: None,
        });
        patches.push(DomPatch::set_style(
            overlay,
            classes::STYLE_DISPLAY,
            "none",
        ));
        patches.push(DomPatch::Create {
            node: content,
            tag: "div".into(),
            class: classes::LIGHTBOX_CONTENT.into(),
            parent: overlay,
            text: None,
        });
        patches.push(DomPatch::Create {
            node: image,
            tag: "img".into(),
            class: String::new(),
            parent: content,
            text: None,
        });
        patches.push(DomPatch::Create {
            node: caption,
            tag: "div".into(),
            class: classes::LIGHTBOX_CAPTION.into(),
            parent: content,
            text: None,
        });
        patches.push(DomPatch::Create {
            node: close,
            tag: "button".into(),
            class: classes::LIGHTBOX_CLOSE.into(),
            parent: overlay,
            text: Some("\u{d7}".into()),
        });

        Self {
            overlay,
            content,
            image,
            caption,
            close,
            open: false,
        }
    }

    /// Show the overlay for one diagram.
    ///
    /// `caption` is the diagram's alt text; an absent caption renders empty
    /// rather than being an error.
    pub fn open(&mut self, src: &str, caption: &str, patches: &mut Vec<DomPatch>) {
        self.open = true;
        patches.push(DomPatch::SetAttr {
            node: self.image,
            name: "src".into(),
            value: src.to_string(),
        });
        patches.push(DomPatch::SetText {
            node: self.caption,
            text: caption.to_string(),
        });
        patches.push(DomPatch::set_style(
            self.overlay,
            classes::STYLE_DISPLAY,
            "flex",
        ));
        patches.push(DomPatch::SetPageScroll { locked: true });
        patches.push(DomPatch::KeyListener { attach: true });
    }

    /// Hide the overlay. No-op while already closed.
    pub fn close(&mut self, patches: &mut Vec<DomPatch>) {
        if !self.open {
            return;
        }
        self.open = false;
        debug!("closing lightbox, restoring page scroll");
        patches.push(DomPatch::set_style(
            self.overlay,
            classes::STYLE_DISPLAY,
            "none",
        ));
        patches.push(DomPatch::SetPageScroll { locked: false });
        patches.push(DomPatch::KeyListener { attach: false });
    }

    /// Whether the overlay is currently shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay element (backdrop click target).
    #[must_use]
    pub const fn overlay(&self) -> NodeId {
        self.overlay
    }

    /// The content wrapper (clicks here must not close the overlay).
    #[must_use]
    pub const fn content(&self) -> NodeId {
        self.content
    }

    /// The close button.
    #[must_use]
    pub const fn close_button(&self) -> NodeId {
        self.close
    }

    /// The enlarged image element.
    #[must_use]
    pub const fn image(&self) -> NodeId {
        self.image
    }

    /// The caption element.
    #[must_use]
    pub const fn caption(&self) -> NodeId {
        self.caption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (Lightbox, Vec<DomPatch>) {
        let mut ids = IdAllocator::starting_at(100);
        let mut patches = Vec::new();
        let lightbox = Lightbox::build(&mut ids, &mut patches);
        (lightbox, patches)
    }

    #[test]
    fn build_is_hidden_and_parented_to_body() {
        let (lightbox, patches) = build();
        assert!(!lightbox.is_open());
        assert!(patches.contains(&DomPatch::Create {
            node: lightbox.overlay(),
            tag: "div".into(),
            class: classes::DIAGRAM_LIGHTBOX.into(),
            parent: NodeId::BODY,
            text: None,
        }));
        assert!(patches.contains(&DomPatch::set_style(
            lightbox.overlay(),
            classes::STYLE_DISPLAY,
            "none",
        )));
    }

    #[test]
    fn open_sets_source_caption_and_locks_scroll() {
        let (mut lightbox, _) = build();
        let mut patches = Vec::new();
        lightbox.open("erd.png", "Entity relationships", &mut patches);

        assert!(lightbox.is_open());
        assert!(patches.contains(&DomPatch::SetAttr {
            node: lightbox.image(),
            name: "src".into(),
            value: "erd.png".into(),
        }));
        assert!(patches.contains(&DomPatch::SetText {
            node: lightbox.caption(),
            text: "Entity relationships".into(),
        }));
        assert!(patches.contains(&DomPatch::SetPageScroll { locked: true }));
        assert!(patches.contains(&DomPatch::KeyListener { attach: true }));
    }

    #[test]
    fn close_restores_scroll_and_detaches_listener() {
        let (mut lightbox, _) = build();
        let mut patches = Vec::new();
        lightbox.open("erd.png", "", &mut patches);

        patches.clear();
        lightbox.close(&mut patches);
        assert!(!lightbox.is_open());
        assert!(patches.contains(&DomPatch::SetPageScroll { locked: false }));
        assert!(patches.contains(&DomPatch::KeyListener { attach: false }));
    }

    #[test]
    fn close_while_closed_is_a_no_op() {
        let (mut lightbox, _) = build();
        let mut patches = Vec::new();
        lightbox.close(&mut patches);
        assert!(patches.is_empty());
    }
}

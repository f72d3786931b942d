//! Controller that owns exactly one child component.

use arbor::{ComponentId, Element, Tree, Widget};

/// Completion callback for a render pass; receives `None` when there is
/// nothing to render.
pub type RenderCallback = Box<dyn FnMut(Option<Element>)>;

/// Owns a single child component and renders it.
///
/// The last callback passed to [`render`](Self::render) is kept, so
/// reassigning the content re-renders through it without the caller having to
/// ask. The controller adds no output of its own.
#[derive(Default)]
pub struct RenderableController {
    content: Option<ComponentId>,
    callback: Option<RenderCallback>,
}

impl RenderableController {
    /// A controller with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mount `widget` and own it as content.
    pub fn with_content(tree: &mut Tree, widget: impl Widget + 'static) -> Self {
        Self::with_content_id(tree.insert(widget))
    }

    /// Own an already mounted component.
    pub fn with_content_id(id: ComponentId) -> Self {
        Self {
            content: Some(id),
            callback: None,
        }
    }

    /// Use `content` if given, otherwise instantiate the preset content type `W`.
    pub fn with_content_or_default<W>(tree: &mut Tree, content: Option<Box<dyn Widget>>) -> Self
    where
        W: Widget + Default + 'static,
    {
        let widget = content.unwrap_or_else(|| Box::new(W::default()));
        Self::with_content_id(tree.insert_boxed(widget))
    }

    /// Instantiate the preset content type `W`.
    pub fn from_default<W>(tree: &mut Tree) -> Self
    where
        W: Widget + Default + 'static,
    {
        Self::with_content_or_default::<W>(tree, None)
    }

    pub fn content(&self) -> Option<ComponentId> {
        self.content
    }

    /// Mount `widget` (or nothing) as the new content.
    pub fn set_content(
        &mut self,
        tree: &mut Tree,
        widget: Option<Box<dyn Widget>>,
    ) -> Option<ComponentId> {
        let id = widget.map(|w| tree.insert_boxed(w));
        self.set_content_id(tree, id);
        id
    }

    /// Reassign the content. The previous child is destroyed and the
    /// controller re-renders if it has been rendered before.
    pub fn set_content_id(&mut self, tree: &mut Tree, id: Option<ComponentId>) {
        if self.replace(tree, id) {
            self.refresh(tree);
        }
    }

    /// Render the current content and invoke `callback` with the output.
    pub fn render(&mut self, tree: &Tree, callback: impl FnMut(Option<Element>) + 'static) {
        let mut callback: RenderCallback = Box::new(callback);
        callback(self.output(tree));
        self.callback = Some(callback);
    }

    /// Reassign the content and render it with a fresh callback, without
    /// notifying the previous callback.
    pub fn replace_and_render(
        &mut self,
        tree: &mut Tree,
        id: ComponentId,
        callback: impl FnMut(Option<Element>) + 'static,
    ) {
        self.replace(tree, Some(id));
        self.render(tree, callback);
    }

    /// Re-render through the retained callback. Returns false if the
    /// controller has never been rendered.
    pub fn refresh(&mut self, tree: &Tree) -> bool {
        let output = self.output(tree);
        match self.callback.as_mut() {
            Some(callback) => {
                callback(output);
                true
            }
            None => false,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.callback.is_some()
    }

    /// Destroy the content and forget the callback.
    pub fn release(&mut self, tree: &mut Tree) {
        if let Some(old) = self.content.take() {
            tree.remove(old);
        }
        self.callback = None;
    }

    fn output(&self, tree: &Tree) -> Option<Element> {
        self.content.and_then(|id| tree.render(id))
    }

    fn replace(&mut self, tree: &mut Tree, id: Option<ComponentId>) -> bool {
        if self.content == id {
            return false;
        }
        if let Some(old) = self.content.take() {
            log::trace!("[renderable] releasing {}", old);
            tree.remove(old);
        }
        self.content = id;
        true
    }
}

impl std::fmt::Debug for RenderableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderableController")
            .field("content", &self.content)
            .field("rendered", &self.callback.is_some())
            .finish()
    }
}

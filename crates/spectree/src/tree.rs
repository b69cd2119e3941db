//! Arena-backed suite tree.
//!
//! A [`Suite`] owns every registered node in a flat arena indexed by
//! [`NodeId`]. Index zero is an anonymous root group. Declarations go through
//! [`Group`] scopes, which borrow the suite mutably for the duration of a
//! group body, so the tree can only grow in declaration order.

use std::time::Duration;

use log::debug;

use crate::location::CodeLocation;
use crate::mode::Mode;

/// Boxed closure stored for hooks and example bodies.
pub(crate) type Body<'a> = Box<dyn FnMut() + 'a>;

/// Stable handle to a node in a [`Suite`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Which list of group hooks to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
    BeforeEach,
    JustBeforeEach,
    AfterEach,
}

#[derive(Default)]
pub(crate) struct Hooks<'a> {
    before_each: Vec<Body<'a>>,
    just_before_each: Vec<Body<'a>>,
    after_each: Vec<Body<'a>>,
}

impl<'a> Hooks<'a> {
    pub(crate) fn list_mut(&mut self, kind: HookKind) -> &mut Vec<Body<'a>> {
        match kind {
            HookKind::BeforeEach => &mut self.before_each,
            HookKind::JustBeforeEach => &mut self.just_before_each,
            HookKind::AfterEach => &mut self.after_each,
        }
    }
}

pub(crate) enum NodeKind<'a> {
    Group {
        children: Vec<NodeId>,
        hooks: Hooks<'a>,
    },
    Example {
        body: Body<'a>,
        timeout: Option<Duration>,
    },
}

/// A registered group or example.
pub struct Node<'a> {
    text: String,
    mode: Mode,
    parent: Option<NodeId>,
    location: CodeLocation,
    pub(crate) kind: NodeKind<'a>,
}

impl Node<'_> {
    /// Label the node was registered with.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mode set on this node itself, ignoring ancestors.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Enclosing group; `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Where the node was declared.
    #[must_use]
    pub const fn location(&self) -> CodeLocation {
        self.location
    }

    /// Whether the node is a group rather than an example.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Children of a group in declaration order; empty for examples.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Group { children, .. } => children,
            NodeKind::Example { .. } => &[],
        }
    }

    /// Timeout declared for an example.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.kind {
            NodeKind::Example { timeout, .. } => timeout,
            NodeKind::Group { .. } => None,
        }
    }
}

/// A tree of groups and examples awaiting a run.
///
/// The lifetime `'a` bounds the closures stored in the tree, so bodies may
/// borrow state that outlives the suite.
///
/// # Examples
///
/// ```
/// use spectree::{Mode, Suite};
///
/// let mut suite = Suite::new();
/// suite.describe("a stack", Mode::Normal, |group| {
///     group.it("is empty when created", Mode::Normal, || {});
/// });
///
/// let examples = suite.examples();
/// assert_eq!(examples.len(), 1);
/// assert_eq!(suite.component_texts(examples[0]), ["a stack", "is empty when created"]);
/// ```
pub struct Suite<'a> {
    nodes: Vec<Node<'a>>,
}

impl Default for Suite<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Suite<'a> {
    /// The anonymous root group every top-level declaration is attached to.
    pub const ROOT: NodeId = NodeId(0);

    /// Create an empty suite containing only the root group.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            text: String::new(),
            mode: Mode::Normal,
            parent: None,
            location: CodeLocation::new(file!(), line!()),
            kind: NodeKind::Group {
                children: Vec::new(),
                hooks: Hooks::default(),
            },
        };
        Self { nodes: vec![root] }
    }

    /// Open a declaration scope on the root group.
    pub fn root(&mut self) -> Group<'_, 'a> {
        Group {
            suite: self,
            id: Self::ROOT,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<'a>> {
        self.nodes.get(id.0)
    }

    /// Every node id in registration order, root included.
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<'a>> {
        self.nodes.get_mut(id.0)
    }

    /// Number of registered nodes, excluding the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every example in depth-first declaration order.
    #[must_use]
    pub fn examples(&self) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if node.is_group() {
                stack.extend(node.children().iter().rev().copied());
            } else {
                found.push(id);
            }
        }
        found
    }

    /// Ancestors of `id` from the outermost group (the root) inwards,
    /// excluding `id` itself.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.node(id).and_then(Node::parent);
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = self.node(parent).and_then(Node::parent);
        }
        chain.reverse();
        chain
    }

    /// Labels of the enclosing groups and the node itself, outermost first.
    /// The root contributes nothing.
    #[must_use]
    pub fn component_texts(&self, id: NodeId) -> Vec<String> {
        self.ancestors(id)
            .into_iter()
            .chain(std::iter::once(id))
            .filter(|node_id| *node_id != Self::ROOT)
            .filter_map(|node_id| self.node(node_id))
            .map(|node| node.text.clone())
            .collect()
    }

    fn push(
        &mut self,
        parent: NodeId,
        text: String,
        mode: Mode,
        location: CodeLocation,
        kind: NodeKind<'a>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!(
            "registering {} {text:?} ({mode}) at {location}",
            if matches!(kind, NodeKind::Group { .. }) {
                "group"
            } else {
                "example"
            }
        );
        self.nodes.push(Node {
            text,
            mode,
            parent: Some(parent),
            location,
            kind,
        });
        if let Some(Node {
            kind: NodeKind::Group { children, .. },
            ..
        }) = self.nodes.get_mut(parent.0)
        {
            children.push(id);
        }
        id
    }

    /// Register a group on the root. See [`Group::describe`].
    #[track_caller]
    pub fn describe(
        &mut self,
        text: impl Into<String>,
        mode: Mode,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.root().describe(text, mode, body)
    }

    /// Register an example on the root. See [`Group::it`].
    #[track_caller]
    pub fn it(&mut self, text: impl Into<String>, mode: Mode, body: impl FnMut() + 'a) -> bool {
        self.root().it(text, mode, body)
    }

    /// Register an example with a timeout on the root. See
    /// [`Group::it_with_timeout`].
    #[track_caller]
    pub fn it_with_timeout(
        &mut self,
        text: impl Into<String>,
        mode: Mode,
        timeout: Duration,
        body: impl FnMut() + 'a,
    ) -> bool {
        self.root().it_with_timeout(text, mode, timeout, body)
    }

    /// Add a hook run before every example in the suite.
    pub fn before_each(&mut self, hook: impl FnMut() + 'a) {
        self.root().before_each(hook);
    }

    /// Add a hook run after all `before_each` hooks of every example.
    pub fn just_before_each(&mut self, hook: impl FnMut() + 'a) {
        self.root().just_before_each(hook);
    }

    /// Add a hook run after every example in the suite.
    pub fn after_each(&mut self, hook: impl FnMut() + 'a) {
        self.root().after_each(hook);
    }
}

/// Declaration scope for one group of a [`Suite`].
pub struct Group<'s, 'a> {
    suite: &'s mut Suite<'a>,
    id: NodeId,
}

impl<'a> Group<'_, 'a> {
    /// Id of the group this scope declares into.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Register a nested group and run `body` to declare its contents.
    ///
    /// Always returns `true`; the flag lets declarations be bound or chained
    /// in expression position.
    #[track_caller]
    pub fn describe(
        &mut self,
        text: impl Into<String>,
        mode: Mode,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        let location = CodeLocation::caller();
        let kind = NodeKind::Group {
            children: Vec::new(),
            hooks: Hooks::default(),
        };
        let id = self.suite.push(self.id, text.into(), mode, location, kind);
        let mut child = Group {
            suite: &mut *self.suite,
            id,
        };
        body(&mut child);
        true
    }

    /// Register an example in this group.
    ///
    /// Always returns `true`, like [`describe`](Self::describe).
    #[track_caller]
    pub fn it(&mut self, text: impl Into<String>, mode: Mode, body: impl FnMut() + 'a) -> bool {
        self.register_example(text.into(), mode, None, Box::new(body), CodeLocation::caller())
    }

    /// Register an example whose body must finish within `timeout`.
    ///
    /// Bodies run synchronously and are never interrupted; an example whose
    /// body overruns is reported as timed out once it returns.
    #[track_caller]
    pub fn it_with_timeout(
        &mut self,
        text: impl Into<String>,
        mode: Mode,
        timeout: Duration,
        body: impl FnMut() + 'a,
    ) -> bool {
        self.register_example(
            text.into(),
            mode,
            Some(timeout),
            Box::new(body),
            CodeLocation::caller(),
        )
    }

    fn register_example(
        &mut self,
        text: String,
        mode: Mode,
        timeout: Option<Duration>,
        body: Body<'a>,
        location: CodeLocation,
    ) -> bool {
        self.suite
            .push(self.id, text, mode, location, NodeKind::Example { body, timeout });
        true
    }

    /// Add a hook run before each example nested in this group.
    pub fn before_each(&mut self, hook: impl FnMut() + 'a) {
        self.add_hook(HookKind::BeforeEach, Box::new(hook));
    }

    /// Add a hook run after every `before_each` hook, immediately before the
    /// example body.
    pub fn just_before_each(&mut self, hook: impl FnMut() + 'a) {
        self.add_hook(HookKind::JustBeforeEach, Box::new(hook));
    }

    /// Add a hook run after each example nested in this group, even when the
    /// example failed.
    pub fn after_each(&mut self, hook: impl FnMut() + 'a) {
        self.add_hook(HookKind::AfterEach, Box::new(hook));
    }

    fn add_hook(&mut self, kind: HookKind, hook: Body<'a>) {
        if let Some(Node {
            kind: NodeKind::Group { hooks, .. },
            ..
        }) = self.suite.node_mut(self.id)
        {
            hooks.list_mut(kind).push(hook);
        }
    }
}

#[cfg(test)]
mod tests;

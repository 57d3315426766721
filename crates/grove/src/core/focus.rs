use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    screen::Screen,
    widget::FocusResponse,
};

/// Focus arbitration over the tree.
///
/// Every container records at most one child as its local focus. The leaf at
/// the end of the chain of local focus pointers from the active root is the
/// one that receives keys. All changes go through `set_focus`, which gives
/// the outgoing and incoming nodes a chance to veto.
pub trait FocusManager {
    /// Make `target` the local focus of `container`, or clear it with
    /// `None`. Setting a target also makes `container` the local focus of
    /// its own parent, all the way to the root. Returns `true` if
    /// `container`'s local focus is `target` afterwards.
    fn set_focus(
        &mut self,
        screen: &mut Screen,
        container: NodeId,
        target: Option<NodeId>,
    ) -> Result<bool>;

    /// Move focus to the next focusable node after the current one inside
    /// `container`, descending into nested containers. Does not wrap.
    /// Returns `true` if focus moved.
    fn focus_next(&mut self, screen: &mut Screen, container: NodeId) -> Result<bool>;

    /// Focus the first focusable node inside `container`.
    fn focus_first(&mut self, screen: &mut Screen, container: NodeId) -> Result<bool>;
}

/// Offer focus to `child` of `container`, then make sure the branch leading
/// to `container` is live.
fn try_focus(tree: &mut Tree, screen: &mut Screen, container: NodeId, child: NodeId) -> Result<bool> {
    let ok = if tree.node(child)?.kind.is_container() {
        tree.focus_first(screen, child)?
    } else {
        tree.set_focus(screen, container, Some(child))?
    };
    if !ok {
        return Ok(false);
    }
    // An already-focused child short-circuits in set_focus without touching
    // ancestors.
    match tree.node(container)?.parent {
        Some(p) => tree.set_focus(screen, p, Some(container)),
        None => Ok(true),
    }
}

impl FocusManager for Tree {
    fn set_focus(
        &mut self,
        screen: &mut Screen,
        container: NodeId,
        target: Option<NodeId>,
    ) -> Result<bool> {
        let node = self.node(container)?;
        if !node.kind.is_container() {
            return Err(Error::Invalid(format!("{} has no children to focus", node.name)));
        }
        if let Some(t) = target
            && !node.children.contains(&t)
        {
            return Err(Error::Invalid(format!("{t:?} is not a child of {}", node.name)));
        }
        let old = node.focus;
        if old == target {
            return Ok(true);
        }

        if target.is_some()
            && let Some(parent) = node.parent
            && !self.set_focus(screen, parent, Some(container))?
        {
            return Ok(false);
        }

        // The outgoing holder still has focus while it decides.
        if let Some(o) = old
            && !self
                .with_widget(screen, o, |w, ctx| w.on_unfocused(ctx, target))?
                .accepted()
        {
            return Ok(false);
        }
        self.node_mut(container)?.focus = target;
        self.redraw = true;

        if let Some(t) = target
            && self.with_widget(screen, t, |w, ctx| w.on_focused(ctx))? == FocusResponse::Refuse
        {
            self.node_mut(container)?.focus = None;
            return Ok(false);
        }
        Ok(true)
    }

    fn focus_next(&mut self, screen: &mut Screen, container: NodeId) -> Result<bool> {
        let node = self.node(container)?;
        if !node.kind.is_container() {
            return Err(Error::Invalid(format!("{} has no children to traverse", node.name)));
        }
        let children = node.children.clone();
        let start = match node.focus {
            Some(f) => {
                let moved = if self.node(f)?.kind.is_container() {
                    self.focus_next(screen, f)?
                } else {
                    self.with_widget(screen, f, |w, ctx| w.focus_next(ctx))?
                };
                if moved {
                    return Ok(true);
                }
                children.iter().position(|c| *c == f).map_or(0, |i| i + 1)
            }
            None => 0,
        };
        for c in &children[start..] {
            if try_focus(self, screen, container, *c)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn focus_first(&mut self, screen: &mut Screen, container: NodeId) -> Result<bool> {
        let node = self.node(container)?;
        if !node.kind.is_container() {
            return Err(Error::Invalid(format!("{} has no children to traverse", node.name)));
        }
        for c in node.children.clone() {
            if try_focus(self, screen, container, c)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

//! Frames and the frame chain.
//!
//! A [`Frame`] maps names to values and links to an outer frame. Each
//! closure call opens a frame whose outer link is the *caller's* current
//! frame, so free variables resolve through the live call chain.
//!
//! [`Environment`] owns the root frame and the handle to the active frame.
//! Frames are pushed and popped only through the evaluator's scope guards.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use rho_ir::{FunctionLit, Name};
use rho_value::Value;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so that every frame allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True when both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings of one call (or of the top level).
#[derive(Debug, Default)]
pub struct Frame {
    objects: FxHashMap<Name, Value>,
    /// Tags of the `..1 ..N` entries. `None` when the frame's closure has no
    /// `...` formal.
    dots: Option<Vec<Option<Name>>>,
    outer: Option<LocalScope<Frame>>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn with_outer(outer: LocalScope<Frame>) -> Self {
        Frame {
            outer: Some(outer),
            ..Frame::default()
        }
    }

    pub fn outer(&self) -> Option<&LocalScope<Frame>> {
        self.outer.as_ref()
    }

    /// Bind in this frame, replacing any previous binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        debug_assert!(!value.is_error(), "error values are never bound");
        self.objects.insert(name, value);
    }

    #[inline]
    pub fn get_local(&self, name: Name) -> Option<&Value> {
        self.objects.get(&name)
    }

    #[inline]
    pub fn get_local_mut(&mut self, name: Name) -> Option<&mut Value> {
        self.objects.get_mut(&name)
    }

    pub fn contains_local(&self, name: Name) -> bool {
        self.objects.contains_key(&name)
    }

    /// Look a name up here, then outward.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.objects.get(&name) {
            return Some(value.clone());
        }
        self.outer.as_ref()?.borrow().lookup(name)
    }

    /// Nearest binding of `name` that is a closure. Other bindings are
    /// skipped, so a variable never hides a function of the same name.
    pub fn lookup_function(&self, name: Name) -> Option<Arc<FunctionLit>> {
        if let Some(Value::Closure(func)) = self.objects.get(&name) {
            return Some(Arc::clone(func));
        }
        self.outer.as_ref()?.borrow().lookup_function(name)
    }

    /// Remove the nearest binding of `name`. Returns false if none exists.
    pub fn remove(&mut self, name: Name) -> bool {
        if self.objects.remove(&name).is_some() {
            return true;
        }
        match &self.outer {
            Some(outer) => outer.borrow_mut().remove(name),
            None => false,
        }
    }

    pub fn set_dots(&mut self, tags: Vec<Option<Name>>) {
        self.dots = Some(tags);
    }

    pub fn dots(&self) -> Option<&[Option<Name>]> {
        self.dots.as_deref()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Root frame plus the active frame handle.
pub struct Environment {
    root: LocalScope<Frame>,
    top: LocalScope<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        let root = LocalScope::new(Frame::new());
        Environment {
            top: root.clone(),
            root,
        }
    }

    pub fn root(&self) -> &LocalScope<Frame> {
        &self.root
    }

    pub fn top(&self) -> &LocalScope<Frame> {
        &self.top
    }

    /// Number of frames from the active one to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = self.top.clone();
        loop {
            let outer = frame.borrow().outer().cloned();
            match outer {
                Some(outer) => {
                    depth += 1;
                    frame = outer;
                }
                None => return depth,
            }
        }
    }

    /// Open a child of the active frame and make it active. Returns the
    /// previously active frame for [`Environment::restore`].
    pub(crate) fn push_frame(&mut self) -> LocalScope<Frame> {
        let child = LocalScope::new(Frame::with_outer(self.top.clone()));
        std::mem::replace(&mut self.top, child)
    }

    pub(crate) fn restore(&mut self, previous: LocalScope<Frame>) {
        self.top = previous;
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.top.borrow().lookup(name)
    }

    #[inline]
    pub fn lookup_function(&self, name: Name) -> Option<Arc<FunctionLit>> {
        self.top.borrow().lookup_function(name)
    }

    /// Bind in the active frame.
    #[inline]
    pub fn define(&self, name: Name, value: Value) {
        self.top.borrow_mut().define(name, value);
    }

    /// `<<-`: rebind in the nearest enclosing frame that already binds
    /// `name`, else in the root frame.
    pub fn assign_super(&self, name: Name, value: Value) {
        let target = self.super_target(name);
        target.borrow_mut().define(name, value);
    }

    fn super_target(&self, name: Name) -> LocalScope<Frame> {
        let mut cursor = self.top.borrow().outer().cloned();
        while let Some(frame) = cursor {
            if frame.borrow().contains_local(name) {
                return frame;
            }
            cursor = frame.borrow().outer().cloned();
        }
        self.root.clone()
    }

    pub fn remove(&self, name: Name) -> bool {
        self.top.borrow_mut().remove(name)
    }

    /// Mutate the active frame's binding of `name` in place.
    ///
    /// A binding found only in an outer frame is first copied into the
    /// active frame, so the outer value is left untouched. Returns `None`
    /// if `name` is unbound everywhere.
    pub fn modify_local<R>(&self, name: Name, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let mut top = self.top.borrow_mut();
        if !top.contains_local(name) {
            let inherited = top.outer()?.borrow().lookup(name)?;
            top.define(name, inherited);
        }
        top.get_local_mut(name).map(f)
    }

    /// Mutate the binding `<<-` would target.
    pub fn modify_super<R>(&self, name: Name, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        let target = self.super_target(name);
        let mut frame = target.borrow_mut();
        frame.get_local_mut(name).map(f)
    }

    /// The frame whose `...` a call-side `...` expands: the nearest frame in
    /// the chain created for a variadic closure.
    pub fn dots_frame(&self) -> Option<LocalScope<Frame>> {
        let mut cursor = Some(self.top.clone());
        while let Some(frame) = cursor {
            if frame.borrow().dots().is_some() {
                return Some(frame);
            }
            cursor = frame.borrow().outer().cloned();
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

use std::{cell::{Ref, RefCell, RefMut}, rc::{Rc, Weak}};

/// Shared, interior-mutable cell. Clone the RcCell, it's shallow copy
#[derive(Debug, Default)]
pub struct RcCell<T: ?Sized> {
	inner: Rc<RefCell<T>>,
}

impl<T: ?Sized> Clone for RcCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T> RcCell<T> {
	pub fn new(value: T) -> Self { Self { inner: Rc::new(RefCell::new(value)) } }
}

impl<T: ?Sized> RcCell<T> {
	pub fn borrow(&self) -> Ref<'_, T> { self.inner.borrow() }

	pub fn borrow_mut(&self) -> RefMut<'_, T> { self.inner.borrow_mut() }

	/// Whether both cells point at the same allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }

	/// A non-owning handle, used where holding the cell would form a cycle.
	pub fn downgrade(&self) -> WeakCell<T> { WeakCell { inner: Rc::downgrade(&self.inner) } }
}

impl<T> From<T> for RcCell<T> {
	fn from(value: T) -> Self { Self::new(value) }
}

/// Weak counterpart of [`RcCell`].
#[derive(Debug)]
pub struct WeakCell<T: ?Sized> {
	inner: Weak<RefCell<T>>,
}

impl<T: ?Sized> Clone for WeakCell<T> {
	fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T: ?Sized> WeakCell<T> {
	pub fn upgrade(&self) -> Option<RcCell<T>> { self.inner.upgrade().map(|inner| RcCell { inner }) }
}

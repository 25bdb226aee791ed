use smallvec::SmallVec;

/// Handle naming one entry of a [`DynamicSubscriptions`] container.
///
/// Ids are never reused within a container, so a stale id simply misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildId(usize);

/// Id-indexed storage for the children of a composite subscription or the
/// observers of a subject.
///
/// Entries refer to each other only through [`ChildId`], never through
/// pointers back into the owner, which keeps the ownership graph a tree.
///
/// ```rust
/// use wheelrx::subscription::DynamicSubscriptions;
///
/// let mut subs: DynamicSubscriptions<&str> = DynamicSubscriptions::default();
/// let a = subs.add("a");
/// let _b = subs.add("b");
/// assert_eq!(subs.remove(a), Some("a"));
/// assert_eq!(subs.len(), 1);
/// ```
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(ChildId, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item and return its id.
  #[inline]
  pub fn add(&mut self, item: U) -> ChildId {
    let id = self.reserve_id();
    self.items.push((id, item));
    id
  }

  /// Allocate an id without storing anything yet.
  ///
  /// Pair with [`insert`](Self::insert) when the item needs to know its own
  /// id before it exists.
  #[inline]
  pub fn reserve_id(&mut self) -> ChildId {
    let id = ChildId(self.next_id);
    self.next_id += 1;
    id
  }

  #[inline]
  pub fn insert(&mut self, id: ChildId, item: U) { self.items.push((id, item)); }

  /// Detach the item registered under `id`, preserving the order of the rest.
  pub fn remove(&mut self, id: ChildId) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, id: ChildId) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Drop every item for which `keep` returns false.
  #[inline]
  pub fn retain(&mut self, mut keep: impl FnMut(&U) -> bool) {
    self.items.retain(|(_, item)| keep(item));
  }

  /// Remove all items in registration order.
  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }
}

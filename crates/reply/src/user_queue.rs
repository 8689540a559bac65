use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use interaction::Id;

/// Limits how many interactions may be in progress at once, in total and
/// per user.
#[derive(Debug)]
pub struct UserQueue {
	max_total: usize,
	max_per_user: usize,
	users: Mutex<HashMap<Id, usize>>,
}

impl UserQueue {
	pub fn new(max_total: usize, max_per_user: usize) -> Self {
		Self {
			max_total,
			max_per_user,
			users: Mutex::new(HashMap::new()),
		}
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<Id, usize>> {
		self.users.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn max_total(&self) -> usize {
		self.max_total
	}

	pub fn max_per_user(&self) -> usize {
		self.max_per_user
	}

	pub fn total(&self) -> usize {
		self.lock().values().sum()
	}

	pub fn count(&self, user: Id) -> usize {
		self.lock().get(&user).copied().unwrap_or(0)
	}

	/// Take a place for `user`. `false` if either limit is reached.
	pub fn add(&self, user: Id) -> bool {
		let mut users = self.lock();
		let total: usize = users.values().sum();
		let current = users.get(&user).copied().unwrap_or(0);
		if total >= self.max_total || current >= self.max_per_user {
			return false;
		}
		users.insert(user, current + 1);
		true
	}

	/// Give back a place. `false` if `user` held none.
	pub fn remove(&self, user: Id) -> bool {
		let mut users = self.lock();
		match users.get_mut(&user) {
			Some(count) if *count > 1 => {
				*count -= 1;
				true
			}
			Some(_) => {
				users.remove(&user);
				true
			}
			None => false,
		}
	}

	/// Like [`add`](Self::add), but the place is given back when the
	/// returned slot is dropped.
	pub fn enter(self: &Arc<Self>, user: Id) -> Option<UserSlot> {
		self.add(user).then(|| UserSlot {
			queue: self.clone(),
			user,
		})
	}
}

/// A place held in a [`UserQueue`].
#[derive(Debug)]
pub struct UserSlot {
	queue: Arc<UserQueue>,
	user: Id,
}

impl UserSlot {
	pub fn user(&self) -> Id {
		self.user
	}
}

impl Drop for UserSlot {
	fn drop(&mut self) {
		self.queue.remove(self.user);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_per_user_limit() {
		let queue = UserQueue::new(usize::MAX, 1);
		assert!(queue.add(Id(1)));
		assert!(!queue.add(Id(1)));
		assert!(queue.add(Id(2)));
		assert_eq!(queue.total(), 2);

		assert!(queue.remove(Id(1)));
		assert!(!queue.remove(Id(1)));
		assert_eq!(queue.count(Id(1)), 0);
		assert!(queue.add(Id(1)));
	}

	#[test]
	fn test_total_limit() {
		let queue = UserQueue::new(3, 2);
		assert!(queue.add(Id(1)));
		assert!(queue.add(Id(1)));
		assert!(!queue.add(Id(1)));
		assert!(queue.add(Id(2)));
		assert!(!queue.add(Id(3)));
		assert_eq!(queue.count(Id(1)), 2);
		assert_eq!(queue.total(), 3);

		queue.remove(Id(1));
		assert_eq!(queue.count(Id(1)), 1);
		assert!(queue.add(Id(3)));
	}

	#[test]
	fn test_slot_gives_place_back_on_drop() {
		let queue = Arc::new(UserQueue::new(usize::MAX, 1));

		let slot = queue.enter(Id(7)).unwrap();
		assert_eq!(slot.user(), Id(7));
		assert!(queue.enter(Id(7)).is_none());

		drop(slot);
		assert_eq!(queue.total(), 0);
		assert!(queue.enter(Id(7)).is_some());
	}
}

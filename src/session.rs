//! Observable session state injected into UI collaborators.
//!
//! Each container holds a value, hands out clones on [`Observable::get`], and notifies every
//! subscriber after [`Observable::set`]. Subscribers are called once with the current value when
//! they subscribe, and are removed when their [`Subscription`] guard drops.

// std
use std::sync::{
	Weak,
	atomic::{AtomicU64, Ordering},
};
// crates.io
use parking_lot::ReentrantMutex;
use time::{Date, OffsetDateTime};
// self
use crate::{_prelude::*, store::TokenStore};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

struct Slot<T> {
	// Held across a write and its notification so subscribers observe writes in order. Reentrant
	// so a listener may call back into the same container.
	publish: ReentrantMutex<()>,
	value: RwLock<T>,
	listeners: Mutex<Vec<(u64, Listener<T>)>>,
	next_id: AtomicU64,
}

/// Shared value container with subscription notification.
pub struct Observable<T>(Arc<Slot<T>>);
impl<T> Observable<T>
where
	T: 'static + Clone + Send + Sync,
{
	/// Creates a container holding `initial`.
	pub fn new(initial: T) -> Self {
		Self(Arc::new(Slot {
			publish: ReentrantMutex::new(()),
			value: RwLock::new(initial),
			listeners: Mutex::new(Vec::new()),
			next_id: AtomicU64::new(0),
		}))
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T {
		self.0.value.read().clone()
	}

	/// Replaces the value and notifies subscribers.
	///
	/// Concurrent writers are serialized, so the last notification always carries the value
	/// [`Observable::get`] returns afterwards.
	pub fn set(&self, value: T) {
		let _publish = self.0.publish.lock();

		*self.0.value.write() = value.clone();

		self.notify(&value);
	}

	/// Derives the next value from the current one and notifies subscribers.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&T) -> T,
	{
		let _publish = self.0.publish.lock();
		let next = {
			let mut guard = self.0.value.write();
			let next = f(&*guard);

			*guard = next.clone();

			next
		};

		self.notify(&next);
	}

	/// Registers `listener`, calling it immediately with the current value.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: 'static + Fn(&T) + Send + Sync,
	{
		let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
		let listener: Listener<T> = Arc::new(listener);
		let _publish = self.0.publish.lock();

		self.0.listeners.lock().push((id, listener.clone()));
		listener(&self.get());

		let slot: Weak<Slot<T>> = Arc::downgrade(&self.0);

		Subscription {
			release: Some(Box::new(move || {
				if let Some(slot) = slot.upgrade() {
					slot.listeners.lock().retain(|(entry, _)| *entry != id);
				}
			})),
		}
	}

	/// Number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.0.listeners.lock().len()
	}

	fn notify(&self, value: &T) {
		// Snapshot first so listeners may subscribe or set without deadlocking.
		let listeners: Vec<Listener<T>> =
			self.0.listeners.lock().iter().map(|(_, listener)| listener.clone()).collect();

		for listener in listeners {
			listener(value);
		}
	}
}
impl<T> Observable<Option<T>>
where
	T: 'static + Clone + Send + Sync,
{
	/// Resets the value to `None` and notifies subscribers.
	pub fn clear(&self) {
		self.set(None);
	}
}
impl<T> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}
impl<T> Debug for Observable<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Observable").field(&*self.0.value.read()).finish()
	}
}

/// Guard returned by [`Observable::subscribe`]; dropping it unsubscribes.
pub struct Subscription {
	release: Option<Box<dyn FnOnce() + Send + Sync>>,
}
impl Subscription {
	/// Unsubscribes immediately.
	pub fn unsubscribe(mut self) {
		self.release_now();
	}

	fn release_now(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}
impl Drop for Subscription {
	fn drop(&mut self) {
		self.release_now();
	}
}
impl Debug for Subscription {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Subscription(..)")
	}
}

/// Whether the user currently holds credentials.
#[derive(Clone, Debug)]
pub struct AuthState(Observable<bool>);
impl AuthState {
	/// Creates a state with an explicit initial value.
	pub fn new(authenticated: bool) -> Self {
		Self(Observable::new(authenticated))
	}

	/// Seeds the state from the presence of a stored access token.
	pub async fn from_store(store: &dyn TokenStore) -> Result<Self> {
		let authenticated = store.load_access_token().await?.is_some();

		Ok(Self::new(authenticated))
	}

	/// Current value.
	pub fn is_authenticated(&self) -> bool {
		self.0.get()
	}

	/// Updates the value after login or logout.
	pub fn set_authenticated(&self, authenticated: bool) {
		self.0.set(authenticated);
	}

	/// Subscribes to changes.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: 'static + Fn(&bool) + Send + Sync,
	{
		self.0.subscribe(listener)
	}
}

/// Profile of the signed-in user as returned by `/users/me/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
	/// User identifier.
	pub id: u32,
	/// Display name.
	pub name: String,
	/// Unique handle.
	pub username: String,
	/// Account email.
	pub email: String,
	/// Self-reported gender.
	#[serde(default)]
	pub gender: String,
	/// Avatar URL.
	#[serde(default)]
	pub profile_picture: Option<String>,
	/// Banner URL.
	#[serde(default)]
	pub banner: Option<String>,
	/// Date of birth.
	#[serde(with = "calendar_date")]
	pub date_of_birth: Date,
	/// Account lifecycle status.
	#[serde(default)]
	pub account_status: String,
	/// Account visibility.
	#[serde(default)]
	pub account_privacy: String,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Signed-in user profile, or `None` when signed out.
#[derive(Clone, Debug)]
pub struct UserState(Observable<Option<UserData>>);
impl UserState {
	/// Creates an empty state.
	pub fn new() -> Self {
		Self(Observable::new(None))
	}

	/// Current profile.
	pub fn current(&self) -> Option<UserData> {
		self.0.get()
	}

	/// Replaces the profile.
	pub fn set_user(&self, user: Option<UserData>) {
		self.0.set(user);
	}

	/// Clears the profile on logout.
	pub fn clear_user(&self) {
		self.0.clear();
	}

	/// Subscribes to changes.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: 'static + Fn(&Option<UserData>) + Send + Sync,
	{
		self.0.subscribe(listener)
	}
}
impl Default for UserState {
	fn default() -> Self {
		Self::new()
	}
}

/// Auth and user state handed to UI collaborators together.
#[derive(Clone, Debug)]
pub struct Session {
	/// Authentication flag.
	pub auth: AuthState,
	/// Signed-in user profile.
	pub user: UserState,
}
impl Session {
	/// Restores the session flags from the token store.
	pub async fn restore(store: &dyn TokenStore) -> Result<Self> {
		Ok(Self { auth: AuthState::from_store(store).await?, user: UserState::new() })
	}

	/// Marks the session as signed in with `user`.
	pub fn sign_in(&self, user: Option<UserData>) {
		self.auth.set_authenticated(true);
		self.user.set_user(user);
	}

	/// Marks the session as signed out.
	pub fn sign_out(&self) {
		self.auth.set_authenticated(false);
		self.user.clear_user();
	}
}

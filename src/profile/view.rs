use tokio::task::JoinHandle;

use crate::{
    consts::consts::{MountId, ReadId, AVATAR_STORAGE_KEY},
    location::Coordinates,
    model::profile::Profile,
    storage::{KeyValueStorage, StorageResult},
};

/// State behind the home view. Owns the in-flight avatar read, which is aborted when the view is
/// dropped.
#[derive(Debug)]
pub struct ProfileView {
    mount_id: MountId,
    profile: Profile,
    profile_image: String,
    location_panel_open: bool,
    location: Option<Coordinates>,
    pending_read: Option<(ReadId, JoinHandle<()>)>,
}

impl ProfileView {
    /// Shows the persisted avatar when there is one, otherwise the profile's own image
    pub fn mount(profile: Profile, storage: &dyn KeyValueStorage) -> Self {
        let profile_image = match storage.get_item(AVATAR_STORAGE_KEY) {
            Ok(Some(image)) => image,
            Ok(None) => profile.image_url.clone(),
            Err(err) => {
                log::warn!("Unable to read stored avatar, using default: {}", err);
                profile.image_url.clone()
            }
        };

        Self {
            mount_id: MountId::new(),
            profile,
            profile_image,
            location_panel_open: false,
            location: None,
            pending_read: None,
        }
    }

    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_image(&self) -> &str {
        &self.profile_image
    }

    pub fn is_reading(&self) -> bool {
        self.pending_read.is_some()
    }

    pub fn is_tracking(&self, read_id: ReadId) -> bool {
        matches!(&self.pending_read, Some((tracked, _)) if *tracked == read_id)
    }

    /// Only one read is tracked at a time, starting another abandons the previous one
    pub fn track_read(&mut self, read_id: ReadId, handle: JoinHandle<()>) {
        if let Some((previous_id, previous)) = self.pending_read.replace((read_id, handle)) {
            log::debug!(
                "Abandoning avatar read [{}] for view [{}]",
                previous_id,
                self.mount_id
            );
            previous.abort();
        }
    }

    /// Stops tracking `read_id`. Returns false when some other read, or none, is tracked.
    pub fn finish_read(&mut self, read_id: ReadId) -> bool {
        if !self.is_tracking(read_id) {
            return false;
        }

        self.pending_read = None;
        true
    }

    /// The display updates even when persisting fails
    pub fn apply_image(
        &mut self,
        data_url: String,
        storage: &mut dyn KeyValueStorage,
    ) -> StorageResult<()> {
        self.profile_image = data_url.clone();
        storage.set_item(AVATAR_STORAGE_KEY, data_url)
    }

    pub fn location_panel_open(&self) -> bool {
        self.location_panel_open
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn open_location_panel(&mut self) {
        self.location_panel_open = true;
    }

    pub fn close_location_panel(&mut self) {
        self.location_panel_open = false;
    }

    pub fn set_location(&mut self, coordinates: Coordinates) {
        self.location = Some(coordinates);
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending_read.take() {
            log::debug!("Unmounting view [{}], aborting avatar read", self.mount_id);
            handle.abort();
        }
    }
}

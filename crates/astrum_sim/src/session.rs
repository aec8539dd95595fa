use astrum_core::PlanetRecord;
use bevy::prelude::*;
use std::collections::HashMap;

/// Identifies one outstanding texture request. Captures the target planet at
/// issue time; the result is always filed under this planet, whatever is
/// focused when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    pub planet_id: &'static str,
    pub planet_name: &'static str,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Requesting(GenerationTicket),
}

/// Generated surface images by planet id. Entries are overwritten, never removed.
#[derive(Debug, Clone, Default)]
pub struct TextureOverrides {
    entries: HashMap<&'static str, Handle<Image>>,
}

impl TextureOverrides {
    pub fn get(&self, planet_id: &str) -> Option<&Handle<Image>> {
        self.entries.get(planet_id)
    }

    pub fn contains(&self, planet_id: &str) -> bool {
        self.entries.contains_key(planet_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, planet_id: &'static str, image: Handle<Image>) -> Option<Handle<Image>> {
        self.entries.insert(planet_id, image)
    }
}

/// Top-level interactive state: focus, generated textures and the
/// in-flight flag. All mutation goes through the named transitions below.
#[derive(Resource, Debug, Default)]
pub struct Session {
    focus: Option<&'static PlanetRecord>,
    overrides: TextureOverrides,
    generation: GenerationState,
    error: Option<String>,
    issued: u64,
}

impl Session {
    pub fn focus(&self) -> Option<&'static PlanetRecord> {
        self.focus
    }

    pub fn focus_id(&self) -> Option<&'static str> {
        self.focus.map(|p| p.id)
    }

    pub fn is_focused(&self, planet_id: &str) -> bool {
        self.focus_id() == Some(planet_id)
    }

    pub fn overrides(&self) -> &TextureOverrides {
        &self.overrides
    }

    /// Last failure message, shown until the next attempt or focus change
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.generation, GenerationState::Requesting(_))
    }

    pub fn pending(&self) -> Option<GenerationTicket> {
        match self.generation {
            GenerationState::Requesting(ticket) => Some(ticket),
            GenerationState::Idle => None,
        }
    }

    /// Focus a planet, replacing any previous focus. Returns whether focus changed.
    pub fn select(&mut self, planet: &'static PlanetRecord) -> bool {
        if self.is_focused(planet.id) {
            return false;
        }
        self.focus = Some(planet);
        self.error = None;
        true
    }

    /// Return to the overview. Returns whether focus changed.
    pub fn deselect(&mut self) -> bool {
        if self.focus.take().is_none() {
            return false;
        }
        self.error = None;
        true
    }

    /// Start a generation for the focused planet. `None` when nothing is
    /// focused or a request is already outstanding anywhere.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.is_generating() {
            return None;
        }
        let planet = self.focus?;
        self.issued += 1;
        let ticket = GenerationTicket {
            planet_id: planet.id,
            planet_name: planet.name,
            seq: self.issued,
        };
        self.generation = GenerationState::Requesting(ticket);
        self.error = None;
        Some(ticket)
    }

    /// File the generated image under the ticket's planet and clear the flag.
    /// Stale tickets are ignored.
    pub fn complete_generation(&mut self, ticket: GenerationTicket, image: Handle<Image>) -> bool {
        if self.pending() != Some(ticket) {
            return false;
        }
        self.overrides.insert(ticket.planet_id, image);
        self.generation = GenerationState::Idle;
        true
    }

    /// Clear the flag and record the user-facing message. Overrides are untouched.
    pub fn fail_generation(&mut self, ticket: GenerationTicket, message: impl Into<String>) -> bool {
        if self.pending() != Some(ticket) {
            return false;
        }
        self.generation = GenerationState::Idle;
        self.error = Some(message.into());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrum_core::catalog::find;

    fn planet(id: &str) -> &'static PlanetRecord {
        find(id).unwrap()
    }

    fn image(n: u128) -> Handle<Image> {
        Handle::weak_from_u128(n)
    }

    #[test]
    fn selecting_replaces_focus() {
        let mut s = Session::default();
        assert!(s.select(planet("earth")));
        assert!(s.select(planet("mars")));
        assert_eq!(s.focus_id(), Some("mars"));
        assert!(!s.is_focused("earth"));
        assert!(!s.select(planet("mars")));
        assert!(s.deselect());
        assert!(s.focus().is_none());
        assert!(!s.deselect());
    }

    #[test]
    fn generation_requires_focus() {
        let mut s = Session::default();
        assert!(s.begin_generation().is_none());
        assert!(!s.is_generating());
    }

    #[test]
    fn success_writes_one_override_for_focused_planet() {
        let mut s = Session::default();
        s.select(planet("earth"));
        let ticket = s.begin_generation().unwrap();
        assert!(s.is_generating());

        assert!(s.complete_generation(ticket, image(1)));
        assert!(!s.is_generating());
        assert_eq!(s.overrides().len(), 1);
        assert_eq!(s.overrides().get("earth"), Some(&image(1)));
        assert_eq!(s.focus_id(), Some("earth"));
    }

    #[test]
    fn late_result_goes_to_requested_planet() {
        let mut s = Session::default();
        s.select(planet("earth"));
        let ticket = s.begin_generation().unwrap();

        s.select(planet("neptune"));
        assert!(s.is_generating());

        assert!(s.complete_generation(ticket, image(7)));
        assert!(s.overrides().contains("earth"));
        assert!(!s.overrides().contains("neptune"));
        assert_eq!(s.focus_id(), Some("neptune"));
    }

    #[test]
    fn result_after_returning_to_overview_still_lands() {
        let mut s = Session::default();
        s.select(planet("saturn"));
        let ticket = s.begin_generation().unwrap();
        s.deselect();
        assert!(s.complete_generation(ticket, image(3)));
        assert!(s.overrides().contains("saturn"));
    }

    #[test]
    fn generate_while_in_flight_is_a_noop() {
        let mut s = Session::default();
        s.select(planet("earth"));
        let first = s.begin_generation().unwrap();
        assert!(s.begin_generation().is_none());

        // serialized system-wide, not just per planet
        s.select(planet("mars"));
        assert!(s.begin_generation().is_none());
        assert_eq!(s.pending(), Some(first));
    }

    #[test]
    fn failure_clears_flag_and_keeps_overrides() {
        let mut s = Session::default();
        s.select(planet("mars"));
        let ticket = s.begin_generation().unwrap();
        assert!(s.fail_generation(ticket, "boom"));

        assert!(!s.is_generating());
        assert!(s.overrides().is_empty());
        assert_eq!(s.error(), Some("boom"));

        // retry clears the message
        let retry = s.begin_generation().unwrap();
        assert_ne!(retry, ticket);
        assert!(s.error().is_none());
    }

    #[test]
    fn stale_tickets_are_ignored() {
        let mut s = Session::default();
        s.select(planet("mars"));
        let old = s.begin_generation().unwrap();
        s.fail_generation(old, "first");
        let current = s.begin_generation().unwrap();

        assert!(!s.complete_generation(old, image(9)));
        assert!(!s.fail_generation(old, "again"));
        assert!(s.is_generating());
        assert!(s.complete_generation(current, image(10)));
    }

    #[test]
    fn regeneration_overwrites_entry() {
        let mut s = Session::default();
        s.select(planet("earth"));
        let a = s.begin_generation().unwrap();
        s.complete_generation(a, image(1));
        let b = s.begin_generation().unwrap();
        s.complete_generation(b, image(2));
        assert_eq!(s.overrides().len(), 1);
        assert_eq!(s.overrides().get("earth"), Some(&image(2)));
    }

    #[test]
    fn focus_change_clears_error() {
        let mut s = Session::default();
        s.select(planet("mars"));
        let t = s.begin_generation().unwrap();
        s.fail_generation(t, "nope");
        s.select(planet("venus"));
        assert!(s.error().is_none());
    }
}

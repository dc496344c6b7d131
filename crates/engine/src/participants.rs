//! The ordered registry of people a bill is split between.

use uuid::Uuid;

/// A registry never shrinks below this many participants; a removal that
/// would cross the floor is refused as a no-op.
pub const MIN_PARTICIPANTS: usize = 2;

/// A person among whom costs are split.
///
/// The id is opaque and immutable once created; only the display name can
/// change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Ordered list of participants.
///
/// Order is significant everywhere downstream: share vectors are indexed in
/// registry order and every remainder lands on the **last** participant.
#[derive(Clone, Debug)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    /// Creates a registry from the given display names, padding with
    /// `Person N` defaults up to the two-person floor.
    #[must_use]
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut participants: Vec<Participant> = names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(|name| Participant::new(name.to_string()))
            .collect();

        while participants.len() < MIN_PARTICIPANTS {
            participants.push(Participant::new(format!(
                "Person {}",
                participants.len() + 1
            )));
        }

        Self { participants }
    }

    /// Appends a new participant with a `Person N` default name and returns
    /// its id.
    pub fn add(&mut self) -> Uuid {
        let participant = Participant::new(format!("Person {}", self.participants.len() + 1));
        let id = participant.id;
        self.participants.push(participant);
        id
    }

    /// Removes a participant.
    ///
    /// Returns `false` without touching the registry when the id is unknown
    /// or the registry is at the two-person floor.
    pub fn remove(&mut self, id: Uuid) -> bool {
        if self.participants.len() <= MIN_PARTICIPANTS {
            return false;
        }
        match self.index_of(id) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    /// Renames a participant. Returns `false` when the id is unknown or the
    /// new name is blank.
    pub fn rename(&mut self, id: Uuid, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.participants.iter_mut().find(|p| p.id == id) {
            Some(participant) => {
                participant.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Returns the registry-order index of a participant id.
    #[must_use]
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// Resolves an id to the participant's display name.
    #[must_use]
    pub fn name_of(&self, id: Uuid) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.participants.iter().map(|p| p.id)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}

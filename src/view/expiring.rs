#[derive(Debug, Clone, PartialEq)]
pub struct Expiring<T> {
    pub id: u64,
    pub item: T,
    pub fading: bool,
}

/// Insertion-ordered items that leave in two phases: fade, then removal.
#[derive(Debug)]
pub struct ExpiringList<T> {
    entries: Vec<Expiring<T>>,
    next_id: u64,
}

impl<T> Default for ExpiringList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> ExpiringList<T> {
    pub fn push(&mut self, item: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Expiring {
            id,
            item,
            fading: false,
        });
        id
    }

    pub fn begin_fade(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.fading = true;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expiring<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

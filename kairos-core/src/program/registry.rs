//! Ordered program registry
//!
//! Insertion order is menu order: the first registered program is index 0.
//! The registry is built once at startup and never changes during a run.

use heapless::{String, Vec};

/// Maximum programs in the menu
pub const MAX_PROGRAMS: usize = 8;

/// Maximum menu name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum parameters per program
pub const MAX_PARAMS: usize = 4;

/// Registry construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No more room in the menu
    Full,
    /// Name longer than `MAX_NAME_LEN`
    NameTooLong,
    /// More than `MAX_PARAMS` parameters
    TooManyParams,
}

/// One menu entry
#[derive(Debug, Clone)]
pub struct ProgramEntry<P> {
    name: String<MAX_NAME_LEN>,
    program: P,
    params: Vec<i32, MAX_PARAMS>,
}

impl<P> ProgramEntry<P> {
    /// Create an entry without parameters
    pub fn new(name: &str, program: P) -> Result<Self, RegistryError> {
        let mut label = String::new();
        label
            .push_str(name)
            .map_err(|_| RegistryError::NameTooLong)?;

        Ok(Self {
            name: label,
            program,
            params: Vec::new(),
        })
    }

    /// Attach parameters passed to the program on every run
    pub fn with_params(mut self, params: &[i32]) -> Result<Self, RegistryError> {
        self.params.clear();
        self.params
            .extend_from_slice(params)
            .map_err(|_| RegistryError::TooManyParams)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn params(&self) -> &[i32] {
        &self.params
    }
}

/// Ordered set of programs offered by the selector
#[derive(Debug, Clone)]
pub struct Registry<P> {
    entries: Vec<ProgramEntry<P>, MAX_PROGRAMS>,
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registry<P> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, returning its menu index
    pub fn register(&mut self, entry: ProgramEntry<P>) -> Result<u8, RegistryError> {
        let index = self.entries.len() as u8;
        self.entries
            .push(entry)
            .map_err(|_| RegistryError::Full)?;
        Ok(index)
    }

    /// Convenience for `register(ProgramEntry::new(name, program)?)`
    pub fn add(&mut self, name: &str, program: P) -> Result<u8, RegistryError> {
        self.register(ProgramEntry::new(name, program)?)
    }

    /// Get an entry by menu index
    pub fn get(&self, index: u8) -> Option<&ProgramEntry<P>> {
        self.entries.get(index as usize)
    }

    /// Find an entry by name (first match)
    pub fn find(&self, name: &str) -> Option<&ProgramEntry<P>> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgramEntry<P>> {
        self.entries.iter()
    }

    /// Menu names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }
}

//! Default menu

use kairos_core::program::{ProgramEntry, Registry, RegistryError};

use crate::mission::Mission;

/// Menu order on the hub
pub const DEFAULT_MENU: [Mission; 4] = [Mission::Sample, Mission::M08, Mission::M09, Mission::Curve];

/// The menu offered by the selector
pub fn default_registry() -> Result<Registry<Mission>, RegistryError> {
    let mut registry = Registry::new();
    for mission in DEFAULT_MENU {
        registry.register(ProgramEntry::new(mission.name(), mission)?)?;
    }
    Ok(registry)
}

/// Entry for a single mission, with parameters where it takes them
pub fn entry(mission: Mission, params: &[i32]) -> Result<ProgramEntry<Mission>, RegistryError> {
    ProgramEntry::new(mission.name(), mission)?.with_params(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get(0).map(|e| e.name()), Some("sample"));
        assert_eq!(registry.get(3).map(|e| *e.program()), Some(Mission::Curve));
        assert_eq!(registry.find("m09").map(|e| *e.program()), Some(Mission::M09));
    }

    #[test]
    fn test_entry_params() {
        let entry = entry(Mission::Shuttle, &[300, 2]).unwrap();
        assert_eq!(entry.params(), &[300, 2]);
        assert!(super::entry(Mission::Shuttle, &[1, 2, 3, 4, 5]).is_err());
    }
}

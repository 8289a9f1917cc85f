// ── EEP profile catalog ──

use serde::Serialize;

/// An EnOcean Equipment Profile as advertised by the add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Profile code, e.g. `D2-01-12`.
    pub eep: String,
    /// Human-readable title. Falls back to the code when the add-on has none.
    pub title: String,
    pub channel_min: Option<i64>,
    pub channel_max: Option<i64>,
}

impl Profile {
    pub fn new(eep: impl Into<String>) -> Self {
        let eep = eep.into();
        Self {
            title: eep.clone(),
            eep,
            channel_min: None,
            channel_max: None,
        }
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.channel_min = Some(min);
        self.channel_max = Some(max);
        self
    }

    /// Inclusive channel range, when the profile declares both bounds.
    pub fn channel_range(&self) -> Option<(i64, i64)> {
        Some((self.channel_min?, self.channel_max?))
    }
}

/// All known profiles, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// Build a catalog. Profiles are sorted by code; for duplicate codes the
    /// last entry wins.
    pub fn new(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let mut profiles: Vec<Profile> = profiles.into_iter().collect();
        profiles.reverse();
        profiles.sort_by(|a, b| a.eep.cmp(&b.eep));
        profiles.dedup_by(|a, b| a.eep == b.eep);
        Self { profiles }
    }

    /// Look up a profile by code. Surrounding whitespace and case are ignored.
    pub fn get(&self, eep: &str) -> Option<&Profile> {
        let eep = eep.trim();
        self.profiles
            .iter()
            .find(|p| p.eep.eq_ignore_ascii_case(eep))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<Profile> for ProfileCatalog {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        Self::new(iter)
    }
}

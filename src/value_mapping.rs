//! Lookup tables translating enumerated characteristic codes into labels.

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MappingResult<FROM, TO> {
    Mapped(TO),
    Unmapped(FROM),
}

impl<FROM, TO> MappingResult<FROM, TO> {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    pub fn is_unmapped(&self) -> bool {
        !self.is_mapped()
    }

    #[inline(always)]
    pub fn into_option(self) -> Option<TO> {
        match self {
            MappingResult::Mapped(v) => Some(v),
            MappingResult::Unmapped(_) => None,
        }
    }

    pub fn unwrap_or(self, default: TO) -> TO {
        self.into_option().unwrap_or(default)
    }
}

/// Code to label rows plus the label used for every code without a row.
#[derive(Debug, Clone, Copy)]
pub struct LabelTable {
    entries: &'static [(i64, &'static str)],
    otherwise: &'static str,
}

impl LabelTable {
    pub const fn new(entries: &'static [(i64, &'static str)], otherwise: &'static str) -> Self {
        Self { entries, otherwise }
    }

    pub fn map_to(&self, code: i64) -> MappingResult<i64, &'static str> {
        self.entries
            .iter()
            .find(|(from, _)| *from == code)
            .map(|(_, to)| MappingResult::Mapped(*to))
            .unwrap_or(MappingResult::Unmapped(code))
    }

    pub fn label(&self, code: i64) -> &'static str {
        self.map_to(code).unwrap_or(self.otherwise)
    }

    pub fn otherwise(&self) -> &'static str {
        self.otherwise
    }
}

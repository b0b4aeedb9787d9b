use crate::{
    CaptionLocation, Characteristic, DisplayColor, DisplayMapper, EntityId, LiveGraph,
    MirrorError, Room, UniqueByIdExt,
};

pub const GROUP_SIZE: usize = 3;

/// Splits `characteristics` into rows of three, keeping the first entry seen for every id and
/// padding the last row with placeholders.
pub fn group_in_triples<I>(characteristics: I) -> Vec<[Characteristic; GROUP_SIZE]>
where
    I: IntoIterator<Item = Characteristic>,
{
    let mut items: Vec<Characteristic> = characteristics.into_iter().unique_by_id().collect();
    while items.len() % GROUP_SIZE != 0 {
        items.push(Characteristic::placeholder());
    }

    let mut groups = Vec::with_capacity(items.len() / GROUP_SIZE);
    let mut iter = items.into_iter();
    while let (Some(a), Some(b), Some(c)) = (iter.next(), iter.next(), iter.next()) {
        groups.push([a, b, c]);
    }
    groups
}

fn value_caption<G: LiveGraph + ?Sized>(
    base: &str,
    characteristic: &Characteristic,
    mapper: &DisplayMapper,
    graph: &G,
    missing: &mut Vec<MirrorError>,
) -> String {
    let value = match mapper.checked_value_string(characteristic, graph) {
        Ok(value) => value,
        // detached entries were already reported by reconciliation
        Err(MirrorError::NotFound { .. }) => String::new(),
        Err(err) => {
            log::debug!("No display value for '{}': {}", characteristic.name, err);
            missing.push(err);
            String::new()
        }
    };
    format!("{} {}", base, value)
}

impl Room {
    /// Room characteristics as display rows, each caption followed by the current value.
    pub fn nested_characteristics<G: LiveGraph + ?Sized>(
        &self,
        mapper: &DisplayMapper,
        graph: &G,
    ) -> Vec<[Characteristic; GROUP_SIZE]> {
        self.nested_rows(mapper, graph, &mut Vec::new())
    }

    fn nested_rows<G: LiveGraph + ?Sized>(
        &self,
        mapper: &DisplayMapper,
        graph: &G,
        missing: &mut Vec<MirrorError>,
    ) -> Vec<[Characteristic; GROUP_SIZE]> {
        let annotated = self.characteristics.iter().unique_by_id().map(|source| {
            let mut c = source.clone();
            let caption = value_caption(&c.icon.caption, &c, mapper, graph, missing);
            c.icon.color = DisplayColor::Primary;
            c.icon.caption_color = DisplayColor::Primary;
            c.icon.caption_location = CaptionLocation::Left;
            c.icon.caption = caption.clone();
            c.caption = caption;
            c
        });
        group_in_triples(annotated)
    }

    /// Rebuilds the rows. Attached characteristics without a displayable value keep an empty
    /// value caption and are returned as `MissingValue` errors.
    pub fn update_nested<G: LiveGraph + ?Sized>(
        &mut self,
        mapper: &DisplayMapper,
        graph: &G,
    ) -> Vec<MirrorError> {
        let mut missing = Vec::new();
        self.nested_characteristics = self.nested_rows(mapper, graph, &mut missing);
        missing
    }

    /// Rewrites the value captions of the existing rows without regrouping.
    /// With `only` set, just the entries of that characteristic are touched.
    pub fn refresh_nested<G: LiveGraph + ?Sized>(
        &mut self,
        mapper: &DisplayMapper,
        graph: &G,
        only: Option<&EntityId>,
    ) -> Vec<MirrorError> {
        let mut missing = Vec::new();
        let characteristics = &self.characteristics;
        for entry in self
            .nested_characteristics
            .iter_mut()
            .flat_map(|group| group.iter_mut())
            .filter(|c| !c.placeholder)
            .filter(|c| only.map_or(true, |id| &c.id == id))
        {
            let base = characteristics
                .iter()
                .find(|c| c.id == entry.id)
                .map(|c| c.icon.caption.as_str())
                .unwrap_or_default();
            let caption = value_caption(base, entry, mapper, graph, &mut missing);
            entry.icon.caption = caption.clone();
            entry.caption = caption;
        }
        missing
    }
}

//! Facet selections and their dependency order

use std::collections::BTreeSet;

/// Filter facets, ordered upstream to downstream. Location is the
/// warehouse id in default mode and the salesperson in person mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Location,
    Brand,
    Product,
    Customer,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Location, Facet::Brand, Facet::Product, Facet::Customer];

    /// Facets whose selections reset when this one changes. Never includes
    /// anything upstream of `self`.
    pub fn downstream(self) -> &'static [Facet] {
        match self {
            Facet::Location => &[Facet::Brand, Facet::Product, Facet::Customer],
            Facet::Brand => &[Facet::Product, Facet::Customer],
            Facet::Product => &[Facet::Customer],
            Facet::Customer => &[],
        }
    }
}

/// The user's current picks, one set per facet. An empty set means the
/// facet is inactive and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub location: BTreeSet<String>,
    pub brand: BTreeSet<String>,
    pub product: BTreeSet<String>,
    pub customer: BTreeSet<String>,
}

impl FacetSelection {
    pub fn get(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Location => &self.location,
            Facet::Brand => &self.brand,
            Facet::Product => &self.product,
            Facet::Customer => &self.customer,
        }
    }

    fn get_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Location => &mut self.location,
            Facet::Brand => &mut self.brand,
            Facet::Product => &mut self.product,
            Facet::Customer => &mut self.customer,
        }
    }

    /// Replace one facet's picks wholesale.
    pub fn set<I, S>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.get_mut(facet) = values.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self, facet: Facet) {
        self.get_mut(facet).clear();
    }

    /// Reset everything below `facet` in the dependency order. Upstream
    /// picks stay as they are.
    pub fn clear_downstream(&mut self, facet: Facet) {
        for &f in facet.downstream() {
            self.clear(f);
        }
    }

    pub fn clear_all(&mut self) {
        for facet in Facet::ALL {
            self.clear(facet);
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        Facet::ALL.iter().all(|facet| self.get(*facet).is_empty())
    }

    /// An empty set matches everything; a missing value never matches an
    /// active set.
    pub fn matches(&self, facet: Facet, value: Option<&str>) -> bool {
        let set = self.get(facet);
        set.is_empty() || value.is_some_and(|v| set.contains(v))
    }
}

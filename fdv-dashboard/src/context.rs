use fdv_core::event::EventRecord;
use fdv_core::geometry::{GeometryCollection, RegionKind};
use fdv_core::hierarchy::RegionHierarchy;
use fdv_core::Result;
use fdv_data::HighlightProjector;

/// Read-only data loaded once at startup and shared by every view.
#[derive(Debug)]
pub struct DashboardContext {
    events: Vec<EventRecord>,
    projector: HighlightProjector,
    hierarchy: RegionHierarchy,
}

impl DashboardContext {
    pub fn new(
        events: Vec<EventRecord>,
        projector: HighlightProjector,
        hierarchy: RegionHierarchy,
    ) -> Self {
        DashboardContext {
            events,
            projector,
            hierarchy,
        }
    }

    /// Load everything the dashboard needs from its embedded sources.
    ///
    /// `districts_geojson_gz` is the gzip-compressed district FeatureCollection.
    /// Any failure aborts the load; there is no partially loaded context.
    pub fn load(
        inventory_csv: &str,
        states_geojson: &str,
        districts_geojson_gz: &[u8],
    ) -> Result<Self> {
        let events = EventRecord::parse_inventory_csv(inventory_csv)?;
        let states = GeometryCollection::from_geojson_str(RegionKind::State, states_geojson)?;
        let districts = GeometryCollection::from_geojson_gz(RegionKind::District, districts_geojson_gz)?;
        let projector = HighlightProjector::new(states, districts)?;
        let hierarchy = RegionHierarchy::embedded()?;
        log::info!(
            "Dashboard context ready: {} events, {} states, {} districts",
            events.len(),
            projector.states().len(),
            projector.districts().len()
        );
        Ok(DashboardContext::new(events, projector, hierarchy))
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn projector(&self) -> &HighlightProjector {
        &self.projector
    }

    pub fn hierarchy(&self) -> &RegionHierarchy {
        &self.hierarchy
    }
}

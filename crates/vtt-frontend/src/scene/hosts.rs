//! Transformer hosts backed by the scene

use glam::Vec2;
use tracing::debug;
use vtt_core::{Pole, Region, Wall};
use vtt_editor::{ActionLog, ActionSink, TransformerHost, WallBreak};

/// Something the editing session must react to after a transformer call
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Drop the scene selection, ending the session
    ClearSelection,
    /// The user finished editing
    Finish,
    /// Continue editing another region
    SwitchToRegion(uuid::Uuid),
    /// The edited wall was split in two
    WallBreak(WallBreak<Pole>),
}

/// Host for editing one wall of the scene
pub struct WallHost<'a> {
    pub walls: &'a mut [Wall],
    pub index: usize,
    pub log: &'a mut ActionLog<Pole>,
    pub events: &'a mut Vec<HostEvent>,
}

impl TransformerHost<Pole> for WallHost<'_> {
    fn on_vertices_change(&mut self, vertices: &[Pole]) {
        if let Some(wall) = self.walls.get_mut(self.index) {
            wall.poles = vertices.to_vec();
        }
    }

    fn on_clear_selections(&mut self) {
        self.events.push(HostEvent::ClearSelection);
    }

    fn on_finish(&mut self) {
        self.events.push(HostEvent::Finish);
    }

    fn on_wall_break(&mut self, split: WallBreak<Pole>) {
        self.events.push(HostEvent::WallBreak(split));
    }

    fn action_sink(&mut self) -> Option<&mut dyn ActionSink<Pole>> {
        Some(&mut *self.log)
    }
}

/// Host for editing one region of the scene
pub struct RegionHost<'a> {
    pub regions: &'a mut [Region],
    pub index: usize,
    pub log: &'a mut ActionLog<Vec2>,
    pub events: &'a mut Vec<HostEvent>,
}

impl TransformerHost<Vec2> for RegionHost<'_> {
    fn on_vertices_change(&mut self, vertices: &[Vec2]) {
        if let Some(region) = self.regions.get_mut(self.index) {
            region.vertices = vertices.to_vec();
        }
    }

    fn on_clear_selections(&mut self) {
        self.events.push(HostEvent::ClearSelection);
    }

    /// Clicking inside another region switches editing to it
    fn on_empty_click(&mut self, world: Vec2) {
        let target = self
            .regions
            .iter()
            .enumerate()
            .filter(|(i, region)| *i != self.index && region.is_switch_target())
            .find(|(_, region)| region.contains(world))
            .map(|(_, region)| region.id);

        match target {
            Some(id) => {
                debug!("Switching to region {}", id);
                self.events.push(HostEvent::SwitchToRegion(id));
            }
            None => self.on_clear_selections(),
        }
    }

    fn on_finish(&mut self) {
        self.events.push(HostEvent::Finish);
    }

    fn action_sink(&mut self) -> Option<&mut dyn ActionSink<Vec2>> {
        Some(&mut *self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtt_core::RegionKind;

    fn regions() -> Vec<Region> {
        vec![
            Region::rectangle("A", RegionKind::Elevation, Vec2::ZERO, Vec2::splat(100.0)),
            Region::rectangle(
                "Fog",
                RegionKind::FogOfWar,
                Vec2::splat(200.0),
                Vec2::splat(300.0),
            ),
            Region::rectangle(
                "B",
                RegionKind::Terrain,
                Vec2::splat(150.0),
                Vec2::splat(400.0),
            ),
        ]
    }

    #[test]
    fn test_empty_click_switches_to_region_under_pointer() {
        let mut regions = regions();
        let target = regions[2].id;
        let mut log = ActionLog::default();
        let mut events = Vec::new();
        let mut host = RegionHost {
            regions: &mut regions,
            index: 0,
            log: &mut log,
            events: &mut events,
        };

        // Inside both the fog region and region B: fog is skipped
        host.on_empty_click(Vec2::splat(250.0));
        assert_eq!(events, vec![HostEvent::SwitchToRegion(target)]);
    }

    #[test]
    fn test_empty_click_outside_clears() {
        let mut regions = regions();
        let mut log = ActionLog::default();
        let mut events = Vec::new();
        let mut host = RegionHost {
            regions: &mut regions,
            index: 0,
            log: &mut log,
            events: &mut events,
        };

        host.on_empty_click(Vec2::new(-50.0, -50.0));
        // Clicking inside the edited region itself does not switch
        host.on_empty_click(Vec2::splat(50.0));
        assert_eq!(events, vec![HostEvent::ClearSelection, HostEvent::ClearSelection]);
    }

    #[test]
    fn test_wall_host_writes_poles() {
        let mut walls = vec![Wall::new("W", vec![Pole::new(0.0, 0.0), Pole::new(1.0, 0.0)])];
        let mut log = ActionLog::default();
        let mut events = Vec::new();
        let mut host = WallHost {
            walls: &mut walls,
            index: 0,
            log: &mut log,
            events: &mut events,
        };

        host.on_vertices_change(&[Pole::new(5.0, 5.0), Pole::new(6.0, 5.0)]);
        assert!(host.action_sink().is_some());
        assert_eq!(walls[0].poles[0].position, Vec2::new(5.0, 5.0));
    }
}

//! Unit positions, availability, and the hospital set.

use ad_core::{RandomSource, UnitId, VertexId};
use ad_graph::{Graph, Router};

use crate::{FleetError, FleetResult, Unit};

/// The hospital closest to some vertex, as found by
/// [`UnitRegistry::nearest_hospital`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HospitalMatch {
    pub hospital: VertexId,
    pub distance: u64,
}

/// Holds every unit and the hospital vertex set.
///
/// `units` is indexed by `UnitId` and never changes length.  The hospital set
/// is fixed at construction; its order is the tie-break order for
/// [`nearest_hospital`](Self::nearest_hospital).
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units:        Vec<Unit>,
    hospitals:    Vec<VertexId>,
    vertex_count: usize,
}

impl UnitRegistry {
    /// Create one available unit per entry of `positions`.
    ///
    /// # Errors
    ///
    /// [`FleetError::VertexOutOfRange`] if any position or hospital is not a
    /// vertex of a graph with `vertex_count` vertices.
    pub fn new(
        vertex_count: usize,
        positions:    &[VertexId],
        hospitals:    &[VertexId],
    ) -> FleetResult<Self> {
        let check = |what: &'static str, v: VertexId| {
            if v.index() < vertex_count {
                Ok(())
            } else {
                Err(FleetError::VertexOutOfRange { what, vertex: v, count: vertex_count })
            }
        };
        for &v in positions {
            check("unit", v)?;
        }
        for &h in hospitals {
            check("hospital", h)?;
        }

        let units = positions
            .iter()
            .enumerate()
            .map(|(i, &v)| Unit::stationed(UnitId(i as u32), v))
            .collect();

        Ok(Self {
            units,
            hospitals: hospitals.to_vec(),
            vertex_count,
        })
    }

    /// Shorthand for [`new`](Self::new) sized to `graph`.
    pub fn for_graph(graph: &Graph, positions: &[VertexId], hospitals: &[VertexId]) -> FleetResult<Self> {
        Self::new(graph.vertex_count(), positions, hospitals)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units in id order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> FleetResult<&Unit> {
        self.units.get(id.index()).ok_or(FleetError::UnitNotFound(id))
    }

    pub fn hospitals(&self) -> &[VertexId] {
        &self.hospitals
    }

    pub fn is_hospital(&self, v: VertexId) -> bool {
        self.hospitals.contains(&v)
    }

    /// Ids of available units, ascending.
    pub fn list_available(&self) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|u| u.available)
            .map(|u| u.id)
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.units.iter().filter(|u| u.available).count()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn set_availability(&mut self, id: UnitId, available: bool) -> FleetResult<()> {
        self.unit_mut(id)?.available = available;
        Ok(())
    }

    pub fn set_position(&mut self, id: UnitId, vertex: VertexId) -> FleetResult<()> {
        if vertex.index() >= self.vertex_count {
            return Err(FleetError::VertexOutOfRange {
                what:  "unit",
                vertex,
                count: self.vertex_count,
            });
        }
        self.unit_mut(id)?.vertex = vertex;
        Ok(())
    }

    /// Give every busy unit an independent chance `probability` of becoming
    /// available again.
    ///
    /// One trial per busy unit, in id order.  Available units draw nothing.
    /// Returns the ids that were released.
    pub fn refresh_availability<S>(&mut self, rng: &mut S, probability: f64) -> Vec<UnitId>
    where
        S: RandomSource + ?Sized,
    {
        let mut released = Vec::new();
        for unit in self.units.iter_mut().filter(|u| !u.available) {
            if rng.chance(probability) {
                unit.available = true;
                released.push(unit.id);
            }
        }
        if !released.is_empty() {
            tracing::debug!(?released, "units released");
        }
        released
    }

    // ── Hospital lookup ───────────────────────────────────────────────────

    /// Closest hospital to `from`, by one shortest-path run per hospital.
    ///
    /// Hospitals are scanned in configured order and the first strictly
    /// shorter distance wins, so ties go to the earlier hospital.  A hospital
    /// located at `from` itself is skipped: a patient picked up at a hospital
    /// is routed to the nearest *other* one.  Returns `None` if no hospital is
    /// reachable.
    pub fn nearest_hospital<R>(
        &self,
        graph:  &Graph,
        router: &R,
        from:   VertexId,
    ) -> FleetResult<Option<HospitalMatch>>
    where
        R: Router + ?Sized,
    {
        let mut best: Option<HospitalMatch> = None;
        for &hospital in &self.hospitals {
            if hospital == from {
                continue;
            }
            let Some(distance) = router.distance(graph, from, hospital)? else {
                continue;
            };
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(HospitalMatch { hospital, distance });
            }
        }
        Ok(best)
    }

    fn unit_mut(&mut self, id: UnitId) -> FleetResult<&mut Unit> {
        self.units.get_mut(id.index()).ok_or(FleetError::UnitNotFound(id))
    }
}

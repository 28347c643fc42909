//! Plain console rendering for the interactive session.

use ad_core::UnitId;
use ad_dispatch::{Assignment, DispatchObserver, DispatchRecord, Request, SessionStats};
use ad_fleet::Unit;
use ad_graph::Graph;

const RULE: &str = "============================================================";

pub fn header(title: &str) {
    println!("\n{RULE}\n   {title}\n{RULE}");
}

/// Distance matrix with `-` for missing roads.
pub fn matrix(graph: &Graph) {
    header("Adjacency Matrix (distances in km)");
    print!("      ");
    for v in graph.vertices() {
        print!("{:>5}", v.0);
    }
    println!();
    for u in graph.vertices() {
        print!("{:>2}    ", u.0);
        for v in graph.vertices() {
            match graph.weight(u, v) {
                Some(w) => print!("{w:>5}"),
                None => print!("{:>5}", "-"),
            }
        }
        println!();
    }
}

pub fn locations(graph: &Graph) {
    header("Available Locations");
    for v in graph.vertices() {
        println!("{:>2} -> {}", v.0, graph.name(v));
    }
}

pub fn unit_status(graph: &Graph, units: &[Unit]) {
    header("Ambulance Status");
    for unit in units {
        println!(" {} at {} -> {}", unit.id, graph.name(unit.vertex), unit.status());
    }
}

pub fn summary(stats: &SessionStats) {
    header("Session Summary");
    println!("Patients Served: {}", stats.served);
    println!("Total Distance Covered: {} km", stats.total_distance);
    if let Some(avg) = stats.average_distance() {
        println!("Average Distance per Patient: {avg} km");
    }
    if stats.unassigned > 0 {
        println!("Requests without an ambulance: {}", stats.unassigned);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints each cycle to stdout and forwards every callback to `inner`.
pub struct ConsoleObserver<O: DispatchObserver> {
    names: Vec<String>,
    inner: O,
}

impl<O: DispatchObserver> ConsoleObserver<O> {
    pub fn new(graph: &Graph, inner: O) -> Self {
        Self { names: graph.names().to_vec(), inner }
    }

    pub fn inner_mut(&mut self) -> &mut O {
        &mut self.inner
    }

    fn name(&self, index: usize) -> &str {
        self.names.get(index).map_or("?", String::as_str)
    }
}

impl<O: DispatchObserver> DispatchObserver for ConsoleObserver<O> {
    fn on_dispatch(&mut self, assignment: &Assignment, record: &DispatchRecord) {
        header("Ambulance Candidates");
        for c in &assignment.candidates {
            match c.estimate {
                Some(e) => println!(
                    " -> {} at {} -> Distance: {} km | ETA: {} mins",
                    c.unit,
                    self.name(c.origin.index()),
                    e.adjusted_distance,
                    e.eta_minutes
                ),
                None => println!(" -> {} at {} -> No route.", c.unit, self.name(c.origin.index())),
            }
        }
        println!(
            "Best Ambulance: {} at {} -> Weighted Distance: {} km",
            assignment.unit,
            self.name(assignment.origin.index()),
            assignment.weighted_distance
        );

        println!("\nShortest Distance: {} km", record.distance);
        if assignment.route.is_trivial() {
            println!("Path: ambulance already on site");
        } else {
            let path: Vec<&str> = assignment
                .route
                .vertices
                .iter()
                .map(|v| self.name(v.index()))
                .collect();
            println!("Path: {}", path.join(" -> "));
        }

        match record.hospital {
            Some(h) => println!("Nearest Hospital: {} ({} km)", self.name(h.hospital.index()), h.distance),
            None => println!("Nearest Hospital: none reachable"),
        }
        if let Some(feedback) = record.feedback {
            println!("Patient Feedback: {feedback}");
        }

        self.inner.on_dispatch(assignment, record);
    }

    fn on_unassigned(&mut self, cycle: u64, request: &Request) {
        println!("No ambulance can reach the patient!");
        self.inner.on_unassigned(cycle, request);
    }

    fn on_release(&mut self, cycle: u64, released: &[UnitId]) {
        if !released.is_empty() {
            let ids: Vec<String> = released.iter().map(ToString::to_string).collect();
            println!("Back in service: {}", ids.join(", "));
        }
        self.inner.on_release(cycle, released);
    }

    fn on_session_end(&mut self, stats: &SessionStats) {
        summary(stats);
        self.inner.on_session_end(stats);
    }
}

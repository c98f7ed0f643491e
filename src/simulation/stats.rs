//! Statistics tracking for the toll plaza simulation

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The event queue drained before the time bound. Not an error.
    Exhausted,
    /// The next pending event lies at or beyond the time bound
    TimeBound,
}

/// Running counters folded in as events are handled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlazaStats {
    /// Vehicles created by arrival events
    pub vehicles_generated: usize,
    /// Vehicles whose service finished
    pub vehicles_processed: usize,
    /// Sum of (departure - arrival) over processed vehicles
    pub total_wait_time: f64,
    /// Longest single wait among processed vehicles
    pub max_wait_time: f64,
}

impl PlazaStats {
    pub fn record_arrival(&mut self) {
        self.vehicles_generated += 1;
    }

    pub fn record_departure(&mut self, wait: f64) {
        self.vehicles_processed += 1;
        self.total_wait_time += wait;
        self.max_wait_time = self.max_wait_time.max(wait);
    }

    /// Mean wait, or None when nothing has been processed yet
    pub fn average_wait_time(&self) -> Option<f64> {
        if self.vehicles_processed == 0 {
            None
        } else {
            Some(self.total_wait_time / self.vehicles_processed as f64)
        }
    }
}

/// Result of [`TollPlaza::run`](super::TollPlaza::run)
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub vehicles_generated: usize,
    pub vehicles_processed: usize,
    pub total_wait_time: f64,
    /// None means no vehicles were processed
    pub average_wait_time: Option<f64>,
    /// None means no vehicles were processed
    pub max_wait_time: Option<f64>,
    /// Vehicles still waiting in a booth queue at cutoff
    pub remaining_queued_count: usize,
    /// Vehicles at a booth window at cutoff, neither processed nor queued
    pub in_service_at_cutoff: usize,
    /// Vehicles served per booth, indexed by booth id
    pub booth_served: Vec<usize>,
    /// Clock value after the last handled event
    pub final_time: f64,
    pub duration_bound: f64,
    pub termination: Termination,
}

impl RunSummary {
    /// Print a summary of the run
    pub fn print_summary(&self) {
        println!("=== Toll Plaza Simulation Summary ===");
        println!(
            "Simulated time: {:.2}s (bound {:.2}s, {})",
            self.final_time,
            self.duration_bound,
            match self.termination {
                Termination::Exhausted => "event queue drained",
                Termination::TimeBound => "time bound reached",
            }
        );
        println!("Total vehicles generated: {}", self.vehicles_generated);
        println!("Total vehicles processed: {}", self.vehicles_processed);
        match self.average_wait_time {
            Some(avg) => println!("Average wait time: {:.2} seconds", avg),
            None => println!("No vehicles were processed."),
        }
        if let Some(max) = self.max_wait_time {
            println!("Longest wait time: {:.2} seconds", max);
        }
        println!(
            "Remaining vehicles in queues: {}",
            self.remaining_queued_count
        );
        println!("Vehicles in service at cutoff: {}", self.in_service_at_cutoff);

        println!("--- Booths ---");
        for (index, served) in self.booth_served.iter().enumerate() {
            println!("  Booth {}: served={}", index, served);
        }
    }
}

//! Toll plaza orchestrator
//!
//! Owns the booths, the scheduler and the counters, and drives the event loop.
//! This is the entry point for running a simulation.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::arrival::{ArrivalProcess, PoissonArrivals};
use super::booth::TollBooth;
use super::config::PlazaConfig;
use super::error::{SimError, SimResult};
use super::event::{Event, EventKind};
use super::fleet::{RandomFleet, VehicleSource};
use super::observer::{LogObserver, PlazaObserver};
use super::routing::{RoutingPolicy, ShortestQueue};
use super::scheduler::EventScheduler;
use super::stats::{PlazaStats, RunSummary, Termination};
use super::types::{BoothId, VehicleId};

/// The main simulation engine
pub struct TollPlaza {
    config: PlazaConfig,

    /// All booths, indexed by booth id
    booths: Vec<TollBooth>,

    scheduler: EventScheduler,

    arrivals: Box<dyn ArrivalProcess>,
    fleet: Box<dyn VehicleSource>,
    routing: Box<dyn RoutingPolicy>,

    rng: StdRng,

    stats: PlazaStats,

    /// Last vehicle id handed out; ids start at 1
    next_vehicle_id: u64,

    /// Whether the first arrival has been scheduled
    started: bool,
}

impl TollPlaza {
    fn new_internal(config: PlazaConfig, rng: StdRng) -> SimResult<Self> {
        config.validate()?;
        let arrivals = PoissonArrivals::new(config.vehicles_per_hour)?;
        let booths = (0..config.booth_count)
            .map(|index| TollBooth::new(BoothId(index)))
            .collect();

        Ok(Self {
            config,
            booths,
            scheduler: EventScheduler::new(),
            arrivals: Box::new(arrivals),
            fleet: Box::new(RandomFleet),
            routing: Box::new(ShortestQueue),
            rng,
            stats: PlazaStats::default(),
            next_vehicle_id: 0,
            started: false,
        })
    }

    /// Create a plaza with Poisson arrivals, the random fleet mix and
    /// shortest-queue routing, seeded from the OS
    pub fn new(config: PlazaConfig) -> SimResult<Self> {
        Self::new_internal(config, StdRng::from_os_rng())
    }

    /// Create a plaza with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: PlazaConfig, seed: u64) -> SimResult<Self> {
        Self::new_internal(config, StdRng::seed_from_u64(seed))
    }

    /// Replace the arrival process. Only meaningful before the run starts.
    pub fn with_arrivals(mut self, arrivals: impl ArrivalProcess + 'static) -> Self {
        self.arrivals = Box::new(arrivals);
        self
    }

    /// Replace the vehicle source
    pub fn with_fleet(mut self, fleet: impl VehicleSource + 'static) -> Self {
        self.fleet = Box::new(fleet);
        self
    }

    /// Replace the routing policy
    pub fn with_routing(mut self, routing: impl RoutingPolicy + 'static) -> Self {
        self.routing = Box::new(routing);
        self
    }

    pub fn config(&self) -> &PlazaConfig {
        &self.config
    }

    pub fn booths(&self) -> &[TollBooth] {
        &self.booths
    }

    pub fn stats(&self) -> &PlazaStats {
        &self.stats
    }

    /// Current simulation time
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Vehicles waiting in any queue
    pub fn queued_count(&self) -> usize {
        self.booths.iter().map(|b| b.queue_len()).sum()
    }

    /// Booths with a vehicle at the window
    pub fn busy_count(&self) -> usize {
        self.booths.iter().filter(|b| b.is_busy()).count()
    }

    /// Every generated vehicle is either processed, queued or in service
    pub fn conservation_holds(&self) -> bool {
        self.stats.vehicles_generated
            == self.stats.vehicles_processed + self.queued_count() + self.busy_count()
    }

    /// Schedule the first arrival. Called by `run`; calling it again is a no-op.
    pub fn start(&mut self) -> SimResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        let now = self.scheduler.now();
        if self
            .arrivals
            .schedule_next(now, &mut self.scheduler, &mut self.rng)?
            .is_none()
        {
            debug!("Arrival process produced no vehicles");
        }
        Ok(())
    }

    /// Pop and handle exactly one event. Returns None once the queue is empty.
    pub fn step(&mut self, observer: &mut dyn PlazaObserver) -> SimResult<Option<Event>> {
        let Some(event) = self.scheduler.pop_next() else {
            return Ok(None);
        };
        trace!("{} at {:.3}s", event.kind.as_str(), event.time());

        match event.kind {
            EventKind::Arrival => self.handle_arrival(observer)?,
            EventKind::StartService(booth) => self.handle_start_service(booth, observer)?,
            EventKind::FinishService(booth) => self.handle_finish_service(booth, observer)?,
        }

        Ok(Some(event))
    }

    /// Run until the queue drains or the next event is at or past
    /// `duration_bound` seconds of simulation time, logging each event
    pub fn run(&mut self, duration_bound: f64) -> SimResult<RunSummary> {
        self.run_observed(duration_bound, &mut LogObserver)
    }

    /// Same as [`run`](Self::run), reporting every event to `observer`
    pub fn run_observed(
        &mut self,
        duration_bound: f64,
        observer: &mut dyn PlazaObserver,
    ) -> SimResult<RunSummary> {
        if !duration_bound.is_finite() || duration_bound <= 0.0 {
            return Err(SimError::config(
                "duration",
                format!("must be a positive number of seconds, got {}", duration_bound),
            ));
        }

        info!(
            "Starting simulation: {} booths, {:.1} vehicles/hour, {:.1}s bound",
            self.booths.len(),
            self.config.vehicles_per_hour,
            duration_bound
        );
        self.start()?;

        let termination = loop {
            match self.scheduler.peek_time() {
                None => break Termination::Exhausted,
                Some(time) if time >= duration_bound => break Termination::TimeBound,
                Some(_) => {
                    self.step(observer)?;
                }
            }
        };

        match termination {
            Termination::Exhausted => info!(
                "Event queue drained at {:.2}s, before the {:.2}s bound",
                self.now(),
                duration_bound
            ),
            Termination::TimeBound => info!(
                "Time bound {:.2}s reached with {} events pending",
                duration_bound,
                self.scheduler.len()
            ),
        }

        let summary = self.summary(duration_bound, termination);
        info!(
            "Simulation ended: {} processed, {} queued, {} in service",
            summary.vehicles_processed,
            summary.remaining_queued_count,
            summary.in_service_at_cutoff
        );
        Ok(summary)
    }

    /// Snapshot of the current statistics
    pub fn summary(&self, duration_bound: f64, termination: Termination) -> RunSummary {
        let processed = self.stats.vehicles_processed;
        RunSummary {
            vehicles_generated: self.stats.vehicles_generated,
            vehicles_processed: processed,
            total_wait_time: self.stats.total_wait_time,
            average_wait_time: self.stats.average_wait_time(),
            max_wait_time: (processed > 0).then_some(self.stats.max_wait_time),
            remaining_queued_count: self.queued_count(),
            in_service_at_cutoff: self.busy_count(),
            booth_served: self.booths.iter().map(|b| b.served()).collect(),
            final_time: self.now(),
            duration_bound,
            termination,
        }
    }

    fn handle_arrival(&mut self, observer: &mut dyn PlazaObserver) -> SimResult<()> {
        let now = self.scheduler.now();

        let booth_count = self.booths.len();
        let chosen = self.routing.select_booth(&self.booths);
        let Some((booth_id, booth)) =
            chosen.and_then(|id| self.booths.get_mut(id.0).map(|booth| (id, booth)))
        else {
            return Err(SimError::InvalidRoute {
                chosen,
                booth_count,
            });
        };

        self.next_vehicle_id += 1;
        let vehicle = self
            .fleet
            .next_vehicle(VehicleId(self.next_vehicle_id), now, &mut self.rng);
        self.stats.record_arrival();

        observer.vehicle_arrived(now, &vehicle, booth_id, booth.queue_len() + 1);
        booth.enqueue(vehicle);

        if !booth.is_busy() {
            self.scheduler
                .schedule(now, EventKind::StartService(booth_id))?;
        }

        self.arrivals
            .schedule_next(now, &mut self.scheduler, &mut self.rng)?;
        Ok(())
    }

    fn handle_start_service(
        &mut self,
        booth_id: BoothId,
        observer: &mut dyn PlazaObserver,
    ) -> SimResult<()> {
        let now = self.scheduler.now();
        let booth = &mut self.booths[booth_id.0];

        // A second start for an already busy booth, or one with nobody waiting
        let Some(vehicle) = booth.start_service() else {
            return Ok(());
        };

        let finish_time = now + self.config.service_duration(vehicle.axle_count);
        observer.service_started(now, vehicle, booth_id, finish_time);
        self.scheduler
            .schedule(finish_time, EventKind::FinishService(booth_id))?;
        Ok(())
    }

    fn handle_finish_service(
        &mut self,
        booth_id: BoothId,
        observer: &mut dyn PlazaObserver,
    ) -> SimResult<()> {
        let now = self.scheduler.now();
        let booth = &mut self.booths[booth_id.0];

        let Some(vehicle) = booth.finish_service(now) else {
            return Ok(());
        };

        self.stats.record_departure(now - vehicle.arrival_time);
        observer.service_finished(now, &vehicle, booth_id, booth.queue_len());

        if booth.queue_len() > 0 {
            self.scheduler
                .schedule(now, EventKind::StartService(booth_id))?;
        }
        Ok(())
    }
}

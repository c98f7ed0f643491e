//! Newline-delimited JSON transaction log
//!
//! Writes one `transaction_event` record per completed service, in the format
//! the analytics warehouse loader consumes. Loading the warehouse is not done
//! here.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use super::config::PlazaConfig;
use super::observer::PlazaObserver;
use super::types::BoothId;
use super::vehicle::Vehicle;

/// `event_type` value of every record this log writes
pub const TRANSACTION_EVENT: &str = "transaction_event";

/// One line of the transaction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub event_type: String,
    pub transaction_id: u64,
    pub toll_fee: f64,
    /// Kilometres
    pub distance: f64,
    /// Seconds between arrival and departure
    pub travel_time: f64,
    /// Vehicles still waiting at the booth when this one left
    pub queue_length: usize,
    pub timestamp: DateTime<Utc>,
    pub vehicle_id: u64,
    pub license_plate: String,
    pub vehicle_type: String,
    pub axle_count: u32,
    pub toll_plaza_id: u32,
    pub toll_plaza_name: String,
    pub payment_method: String,
}

/// Observer that writes a [`TransactionRecord`] line per finished service
///
/// Write failures never stop the simulation. The first one is kept and
/// returned from [`finish`](Self::finish); later records are dropped.
pub struct TransactionLog<W: Write> {
    writer: W,
    plaza_id: u32,
    plaza_name: String,
    fee_per_axle: f64,
    distance_km: f64,
    epoch: DateTime<Utc>,
    next_transaction_id: u64,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> TransactionLog<W> {
    pub fn new(writer: W, config: &PlazaConfig) -> Self {
        Self {
            writer,
            plaza_id: config.plaza_id,
            plaza_name: config.plaza_name.clone(),
            fee_per_axle: config.fee_per_axle,
            distance_km: config.approach_distance_km,
            epoch: config.epoch,
            next_transaction_id: 1,
            written: 0,
            error: None,
        }
    }

    /// Number of records successfully written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Wall clock instant for a simulation time, millisecond precision.
    /// `None` if the instant is outside the range chrono can represent.
    pub fn timestamp_at(&self, time: f64) -> Option<DateTime<Utc>> {
        let millis = (time * 1000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        Duration::try_milliseconds(millis as i64)
            .and_then(|offset| self.epoch.checked_add_signed(offset))
    }

    /// Build the record for a vehicle that just departed
    pub fn record_for(
        &self,
        time: f64,
        vehicle: &Vehicle,
        queue_length: usize,
    ) -> io::Result<TransactionRecord> {
        let timestamp = self.timestamp_at(time).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("simulation time {}s has no wall clock timestamp", time),
            )
        })?;

        Ok(TransactionRecord {
            event_type: TRANSACTION_EVENT.to_string(),
            transaction_id: self.next_transaction_id,
            toll_fee: vehicle.axle_count as f64 * self.fee_per_axle,
            distance: self.distance_km,
            travel_time: time - vehicle.arrival_time,
            queue_length,
            timestamp,
            vehicle_id: vehicle.id.0,
            license_plate: vehicle.license_plate(),
            vehicle_type: vehicle.class.as_str().to_string(),
            axle_count: vehicle.axle_count,
            toll_plaza_id: self.plaza_id,
            toll_plaza_name: self.plaza_name.clone(),
            payment_method: vehicle.payment_method.as_str().to_string(),
        })
    }

    fn write_record(&mut self, record: &TransactionRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }

    /// Flush and hand back the writer, or the first write error seen
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err).context("Failed to write transaction log");
        }
        self.writer
            .flush()
            .context("Failed to flush transaction log")?;
        Ok(self.writer)
    }
}

impl<W: Write> PlazaObserver for TransactionLog<W> {
    fn service_finished(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        _booth: BoothId,
        queue_length: usize,
    ) {
        if self.error.is_some() {
            return;
        }

        let result = self
            .record_for(time, vehicle, queue_length)
            .and_then(|record| self.write_record(&record));
        match result {
            Ok(()) => {
                self.next_transaction_id += 1;
                self.written += 1;
            }
            Err(err) => {
                warn!(
                    "Transaction log failed at {:.2}s, dropping further records: {}",
                    time, err
                );
                self.error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::{PaymentMethod, VehicleClass, VehicleId};

    fn truck(arrival_time: f64) -> Vehicle {
        Vehicle::new(
            VehicleId(42),
            VehicleClass::Truck,
            4,
            72.5,
            PaymentMethod::ElectronicTag,
            arrival_time,
        )
    }

    #[test]
    fn test_writes_one_line_per_finished_service() {
        let config = PlazaConfig::default();
        let mut log = TransactionLog::new(Vec::new(), &config);

        log.service_finished(12.0, &truck(3.5), BoothId(1), 2);
        log.service_finished(20.0, &truck(10.0), BoothId(0), 0);
        assert_eq!(log.written(), 2);

        let bytes = log.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let records: Vec<TransactionRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.event_type, "transaction_event");
        assert_eq!(first.transaction_id, 1);
        assert_eq!(first.toll_fee, 6.0);
        assert_eq!(first.travel_time, 8.5);
        assert_eq!(first.queue_length, 2);
        assert_eq!(first.vehicle_id, 42);
        assert_eq!(first.license_plate, "TP-000042");
        assert_eq!(first.vehicle_type, "Truck");
        assert_eq!(first.axle_count, 4);
        assert_eq!(first.toll_plaza_id, 1);
        assert_eq!(first.toll_plaza_name, "Main Plaza");
        assert_eq!(first.payment_method, "Electronic Tag");
        assert_eq!(records[1].transaction_id, 2);
    }

    #[test]
    fn test_timestamp_is_epoch_plus_sim_time() {
        let config = PlazaConfig::default();
        let log = TransactionLog::new(Vec::new(), &config);
        let stamp = log.timestamp_at(90.5).unwrap();
        assert_eq!(stamp.to_rfc3339(), "2025-01-01T00:01:30.500+00:00");
    }

    #[test]
    fn test_timestamp_out_of_range_is_none() {
        let config = PlazaConfig::default();
        let log = TransactionLog::new(Vec::new(), &config);
        // Past chrono's year range, past i64 milliseconds, and not a number
        assert_eq!(log.timestamp_at(1.0e14), None);
        assert_eq!(log.timestamp_at(1.0e17), None);
        assert_eq!(log.timestamp_at(f64::INFINITY), None);
    }

    #[test]
    fn test_unrepresentable_time_is_reported_on_finish() {
        let config = PlazaConfig::default();
        let mut log = TransactionLog::new(Vec::new(), &config);
        log.service_finished(5.0, &truck(0.0), BoothId(0), 0);
        log.service_finished(1.0e14, &truck(0.0), BoothId(0), 0);
        // Later records are dropped once the log has failed
        log.service_finished(6.0, &truck(0.0), BoothId(0), 0);
        assert_eq!(log.written(), 1);
        assert!(log.finish().is_err());
    }

    #[test]
    fn test_ignores_arrivals_and_starts() {
        let config = PlazaConfig::default();
        let mut log = TransactionLog::new(Vec::new(), &config);
        log.vehicle_arrived(0.0, &truck(0.0), BoothId(0), 1);
        log.service_started(0.0, &truck(0.0), BoothId(0), 8.0);
        assert_eq!(log.written(), 0);
        assert!(log.finish().unwrap().is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported_on_finish() {
        let config = PlazaConfig::default();
        let mut log = TransactionLog::new(BrokenPipe, &config);
        log.service_finished(5.0, &truck(0.0), BoothId(0), 0);
        log.service_finished(6.0, &truck(0.0), BoothId(0), 0);
        assert_eq!(log.written(), 0);
        assert!(log.finish().is_err());
    }
}

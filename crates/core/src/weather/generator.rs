//! Synthetic field generation
//!
//! Every timestep is an independent `n_lat × n_lon` layer: a deterministic
//! diurnal/spatial pattern plus seeded noise. Layers are filled in parallel,
//! each from its own stream of the per-call generator.

use crate::core_types::{Field3D, FieldKind, FieldSet, PointOfInterest};
use crate::error::{SynthError, SynthResult};
use crate::grid::{Domain, LatLonGrid, TimeAxis, TimeWindow};
use crate::weather::params::GenerationParams;
use crate::weather::seed::FixedSeedPerCall;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use rayon::prelude::*;
use tracing::{debug, info};

/// Noise and rain-amount distributions, built once per call
struct Samplers {
    temperature: Normal<f64>,
    wind: Normal<f64>,
    pressure: Normal<f64>,
    rain_amount: Exp<f64>,
}

impl Samplers {
    fn new(params: &GenerationParams) -> SynthResult<Self> {
        let normal = |name: &'static str, std_dev: f64| {
            Normal::new(0.0, std_dev).map_err(|e| SynthError::InvalidParameter {
                name,
                reason: e.to_string(),
            })
        };
        let rain_amount = Exp::new(1.0 / params.precipitation.mean_amount_mm).map_err(|e| {
            SynthError::InvalidParameter {
                name: "precipitation.mean_amount_mm",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            temperature: normal("temperature.noise_std_dev", params.temperature.noise_std_dev)?,
            wind: normal("wind.noise_std_dev", params.wind.noise_std_dev)?,
            pressure: normal("pressure.noise_std_dev", params.pressure.noise_std_dev)?,
            rain_amount,
        })
    }
}

/// Mutable views of one timestep across the five output buffers
struct Layer<'a> {
    temperature: &'a mut [f64],
    u_wind: &'a mut [f64],
    v_wind: &'a mut [f64],
    pressure: &'a mut [f64],
    precipitation: &'a mut [f64],
}

/// Builds a [`FieldSet`] from [`GenerationParams`]
#[derive(Debug, Clone, Default)]
pub struct FieldGenerator {
    params: GenerationParams,
}

impl FieldGenerator {
    pub fn new(params: GenerationParams) -> Self {
        Self { params }
    }

    /// Generate every field over `domain` at `resolution × resolution` points
    /// for each hour of `window`
    ///
    /// `poi` centers the local perturbations (cooling, wind channeling,
    /// orographic rain). Identical inputs and `seed` give bit-identical output.
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidDomain`] for non-finite or inverted bounds
    /// - [`SynthError::InvalidResolution`] for fewer than 2 points per axis
    /// - [`SynthError::InvalidTimeWindow`] for an empty window
    /// - [`SynthError::FieldTooLarge`] if a field buffer cannot be allocated
    /// - [`SynthError::InvalidParameter`] for a bad point of interest or
    ///   generation parameter
    pub fn generate(
        &self,
        domain: &Domain,
        resolution: usize,
        window: &TimeWindow,
        poi: &PointOfInterest,
        seed: u64,
    ) -> SynthResult<FieldSet> {
        self.params.validate()?;
        poi.validate()?;
        let samplers = Samplers::new(&self.params)?;
        window.validate()?;
        let cells = buffer_len(window.len(), resolution)?;
        let grid = LatLonGrid::new(*domain, resolution)?;
        let times = TimeAxis::from_window(window)?;

        let (n_lat, n_lon) = grid.shape();
        let n_times = times.len();
        let plane = n_lat * n_lon;
        info!(
            "Generating synthetic fields: {}x{} grid, {} hourly steps, seed={}",
            n_lat, n_lon, n_times, seed
        );

        let policy = FixedSeedPerCall::new(seed);
        let hours = times.hours_of_day();
        let mut temperature = vec![0.0; cells];
        let mut u_wind = vec![0.0; cells];
        let mut v_wind = vec![0.0; cells];
        let mut pressure = vec![0.0; cells];
        let mut precipitation = vec![0.0; cells];

        temperature
            .par_chunks_mut(plane)
            .zip(u_wind.par_chunks_mut(plane))
            .zip(v_wind.par_chunks_mut(plane))
            .zip(pressure.par_chunks_mut(plane))
            .zip(precipitation.par_chunks_mut(plane))
            .enumerate()
            .for_each(|(t, ((((temperature, u_wind), v_wind), pressure), precipitation))| {
                let mut layer = Layer {
                    temperature,
                    u_wind,
                    v_wind,
                    pressure,
                    precipitation,
                };
                let mut rng = policy.rng_for_timestep(t);
                self.fill_layer(&grid, poi, &samplers, hours[t], &mut rng, &mut layer);
            });

        let total_precip: f64 = precipitation.iter().sum();
        info!(
            "Synthetic fields ready: domain-total precipitation {:.1} mm",
            total_precip
        );

        FieldSet::new(
            grid,
            times,
            Field3D::from_vec(FieldKind::Temperature, temperature, n_times, n_lat, n_lon),
            Field3D::from_vec(FieldKind::UWind, u_wind, n_times, n_lat, n_lon),
            Field3D::from_vec(FieldKind::VWind, v_wind, n_times, n_lat, n_lon),
            Field3D::from_vec(FieldKind::Pressure, pressure, n_times, n_lat, n_lon),
            Field3D::from_vec(FieldKind::Precipitation, precipitation, n_times, n_lat, n_lon),
        )
    }

    fn fill_layer<R: Rng>(
        &self,
        grid: &LatLonGrid,
        poi: &PointOfInterest,
        samplers: &Samplers,
        hour: u32,
        rng: &mut R,
        layer: &mut Layer<'_>,
    ) {
        let temp = &self.params.temperature;
        let wind = &self.params.wind;
        let rain = &self.params.precipitation;
        let domain = grid.domain();
        let n_lon = grid.lons().len();

        let base_temp = temp.base_at(hour);
        let base_u = wind.u.value_at(f64::from(hour));
        let base_v = wind.v.value_at(f64::from(hour));
        let base_pressure = self.params.pressure.diurnal.value_at(f64::from(hour));
        let rain_probability = rain.probability_at(hour);

        debug!(
            "Layer {:02}:00 UTC: T0={:.2}, u0={:.2}, v0={:.2}, p0={:.2}, rain p={:.3}",
            hour, base_temp, base_u, base_v, base_pressure, rain_probability
        );

        for (i, &lat) in grid.lats().iter().enumerate() {
            for (j, &lon) in grid.lons().iter().enumerate() {
                let idx = i * n_lon + j;

                let mut t = base_temp
                    + temp.lat_gradient * (lat - domain.lat_min)
                    + temp.lon_gradient * (lon - domain.lon_min).abs();
                if poi.is_near(lat, lon, temp.elevation_radius_deg) {
                    t -= temp.elevation_cooling;
                }
                layer.temperature[idx] = t + samplers.temperature.sample(rng);

                let (mut u, mut v) = (base_u, base_v);
                if poi.is_near(lat, lon, wind.channel_radius_deg) {
                    u += wind.channel_u;
                    v += wind.channel_v;
                }
                layer.u_wind[idx] = u + samplers.wind.sample(rng);
                layer.v_wind[idx] = v + samplers.wind.sample(rng);

                layer.pressure[idx] = base_pressure + samplers.pressure.sample(rng);

                // Zero probability before onset: no draw, exact zero
                layer.precipitation[idx] =
                    if rain_probability > 0.0 && rng.random::<f64>() < rain_probability {
                        let multiplier = if poi.is_near(lat, lon, rain.orographic_radius_deg) {
                            rain.orographic_multiplier
                        } else {
                            1.0
                        };
                        let amount = samplers.rain_amount.sample(rng) * multiplier;
                        if amount < rain.min_amount_mm {
                            0.0
                        } else {
                            amount
                        }
                    } else {
                        0.0
                    };
            }
        }
    }
}

/// Values per field buffer, rejected when the byte size passes `isize::MAX`
fn buffer_len(n_times: usize, resolution: usize) -> SynthResult<usize> {
    resolution
        .checked_mul(resolution)
        .and_then(|plane| plane.checked_mul(n_times))
        .filter(|&cells| {
            cells
                .checked_mul(std::mem::size_of::<f64>())
                .is_some_and(|bytes| bytes <= isize::MAX.unsigned_abs())
        })
        .ok_or(SynthError::FieldTooLarge {
            n_times,
            resolution,
        })
}

//! Property tests for the emissions calculator.
//!
//! These tests verify relationships that must hold for every input:
//! - Linearity in distance and weight
//! - The breakdown terms sum to the adjusted CO2 mass
//! - GWP conversion of the per-gas masses
//! - Monotonic response to weather and load

use approx::assert_relative_eq;
use cfip_calculator::adjustments::DepartureSlot;
use cfip_calculator::{CalculationInput, EmissionsCalculator, ShipmentRequest};
use cfip_core::errors::CFIPError;
use cfip_core::factors::{EmissionFactorTable, DEFAULT_EMISSION_FACTORS};
use cfip_core::transport::{FuelType, Scope, TransportMode, WeatherCondition};
use std::sync::Arc;

/// Every seeded (mode, fuel) pair.
fn seeded_pairs() -> Vec<(TransportMode, FuelType)> {
    DEFAULT_EMISSION_FACTORS
        .iter()
        .map(|factor| (factor.transport_mode, factor.fuel_type))
        .collect()
}

mod invariants {
    use super::*;

    #[test]
    fn test_linearity_in_distance_and_weight() {
        let calculator = EmissionsCalculator::seeded();

        for (mode, fuel) in seeded_pairs() {
            let input = CalculationInput::new(250.0, 4.0, mode, fuel)
                .with_weather(WeatherCondition::LightAdverse)
                .with_capacity_utilization(65.0);
            let single = calculator.calculate(&input).unwrap();

            let mut double_distance = input.clone();
            double_distance.distance *= 2.0;
            let by_distance = calculator.calculate(&double_distance).unwrap();

            let mut double_weight = input.clone();
            double_weight.weight *= 2.0;
            let by_weight = calculator.calculate(&double_weight).unwrap();

            for doubled in [by_distance, by_weight] {
                assert_relative_eq!(doubled.co2, 2.0 * single.co2, max_relative = 1e-12);
                assert_relative_eq!(doubled.ch4, 2.0 * single.ch4, max_relative = 1e-12);
                assert_relative_eq!(doubled.n2o, 2.0 * single.n2o, max_relative = 1e-12);
                assert_relative_eq!(
                    doubled.total_co2e,
                    2.0 * single.total_co2e,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_breakdown_sums_to_adjusted_co2() {
        let calculator = EmissionsCalculator::seeded();
        let departures = [
            None,
            Some(DepartureSlot::new(7, 1)),
            Some(DepartureSlot::new(12, 3)),
            Some(DepartureSlot::new(20, 5)),
            Some(DepartureSlot::new(2, 4)),
            Some(DepartureSlot::new(10, 0)),
        ];

        for (mode, fuel) in seeded_pairs() {
            for weather in WeatherCondition::ALL {
                for capacity in [100.0, 85.0, 72.0, 61.0, 55.0, 20.0] {
                    for departure in departures {
                        let mut input = CalculationInput::new(320.0, 7.5, mode, fuel)
                            .with_weather(*weather)
                            .with_capacity_utilization(capacity);
                        input.departure = departure;

                        let result = calculator.calculate(&input).unwrap();
                        assert_relative_eq!(
                            result.breakdown.total(),
                            result.co2,
                            max_relative = 1e-12
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_gwp_conversion() {
        let calculator = EmissionsCalculator::seeded();

        for (mode, fuel) in seeded_pairs() {
            let input = CalculationInput::new(800.0, 12.0, mode, fuel)
                .with_weather(WeatherCondition::SnowIce)
                .with_departure(16, 2);
            let result = calculator.calculate(&input).unwrap();

            let co2e = result.co2 + result.ch4 * 28.0 + result.n2o * 265.0;
            let expected = if mode == TransportMode::Air {
                2.0 * co2e
            } else {
                co2e
            };
            assert_relative_eq!(result.total_co2e, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_weather_monotonicity() {
        let calculator = EmissionsCalculator::seeded();

        for (mode, fuel) in seeded_pairs() {
            let totals: Vec<f64> = WeatherCondition::ALL
                .iter()
                .map(|weather| {
                    let input = CalculationInput::new(100.0, 10.0, mode, fuel).with_weather(*weather);
                    calculator.calculate(&input).unwrap().total_co2e
                })
                .collect();

            for pair in totals.windows(2) {
                assert!(
                    pair[0] <= pair[1],
                    "{} {}: emissions decreased with worse weather: {:?}",
                    mode,
                    fuel,
                    totals
                );
            }
        }
    }

    #[test]
    fn test_load_monotonicity() {
        let calculator = EmissionsCalculator::seeded();

        for (mode, fuel) in seeded_pairs() {
            let mut previous = f64::INFINITY;
            for capacity in 50..=100 {
                let input = CalculationInput::new(100.0, 10.0, mode, fuel)
                    .with_capacity_utilization(capacity as f64);
                let total = calculator.calculate(&input).unwrap().total_co2e;
                assert!(
                    total <= previous,
                    "{} {}: emissions increased at {}% utilisation",
                    mode,
                    fuel,
                    capacity
                );
                previous = total;
            }
        }
    }

    #[test]
    fn test_every_seeded_pair_is_scope_3() {
        let calculator = EmissionsCalculator::seeded();

        for (mode, fuel) in seeded_pairs() {
            let input = CalculationInput::new(100.0, 10.0, mode, fuel);
            let result = calculator.calculate(&input).unwrap();
            assert_eq!(result.scope, Scope::Scope3, "{} {}", mode, fuel);
        }
    }

    #[test]
    fn test_missing_factor_for_every_unseeded_pair() {
        let calculator = EmissionsCalculator::seeded();
        let seeded = seeded_pairs();

        for mode in TransportMode::ALL {
            for fuel in FuelType::ALL {
                if seeded.contains(&(*mode, *fuel)) {
                    continue;
                }
                let input = CalculationInput::new(100.0, 10.0, *mode, *fuel);
                assert!(
                    matches!(
                        calculator.calculate(&input),
                        Err(CFIPError::FactorNotFound { .. })
                    ),
                    "{} {} should have no factor",
                    mode,
                    fuel
                );
            }
        }
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_truck_diesel_fully_loaded() {
        let calculator = EmissionsCalculator::seeded();
        let input = CalculationInput::new(100.0, 10.0, TransportMode::Truck, FuelType::Diesel)
            .with_weather(WeatherCondition::Normal)
            .with_capacity_utilization(100.0);
        let result = calculator.calculate(&input).unwrap();

        assert_relative_eq!(result.breakdown.base, 97.0, max_relative = 1e-12);
        assert_relative_eq!(result.co2, 97.0, max_relative = 1e-12);
        assert_relative_eq!(result.ch4, 0.0015, max_relative = 1e-12);
        assert_relative_eq!(result.n2o, 0.0032, max_relative = 1e-12);
        assert_relative_eq!(result.total_co2e, 97.0 + 0.042 + 0.848, max_relative = 1e-12);
    }

    #[test]
    fn test_truck_diesel_below_half_loaded() {
        let calculator = EmissionsCalculator::seeded();
        let input = CalculationInput::new(100.0, 10.0, TransportMode::Truck, FuelType::Diesel)
            .with_capacity_utilization(45.0);
        let result = calculator.calculate(&input).unwrap();

        assert_relative_eq!(result.co2, 126.1, max_relative = 1e-12);
        assert_relative_eq!(result.breakdown.load_adjustment, 29.1, max_relative = 1e-12);
        assert_relative_eq!(
            result.breakdown.base + result.breakdown.load_adjustment,
            result.co2,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_air_freight_doubles_total() {
        let calculator = EmissionsCalculator::seeded();
        let input = CalculationInput::new(1000.0, 5.0, TransportMode::Air, FuelType::JetFuel);
        let result = calculator.calculate(&input).unwrap();

        assert_relative_eq!(result.breakdown.base, 2500.0, max_relative = 1e-12);
        let unscaled = result.co2 + result.ch4 * 28.0 + result.n2o * 265.0;
        assert_relative_eq!(result.total_co2e, 2.0 * unscaled, max_relative = 1e-12);
    }

    #[test]
    fn test_hydrogen_truck_has_no_factor() {
        let calculator = EmissionsCalculator::seeded();
        let request = ShipmentRequest {
            origin: "Kitwe".to_string(),
            destination: "Livingstone".to_string(),
            distance: 100.0,
            weight: 10.0,
            transport_mode: "TRUCK".to_string(),
            fuel_type: "HYDROGEN".to_string(),
            ..ShipmentRequest::default()
        };

        let err = calculator.calculate_request(&request).unwrap_err();
        assert!(matches!(err, CFIPError::FactorNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Emission factor not found for TRUCK - HYDROGEN (region GLOBAL)"
        );
    }

    #[test]
    fn test_extreme_combination_exceeds_doubling_threshold() {
        let calculator = EmissionsCalculator::seeded();
        let input = CalculationInput::new(100.0, 10.0, TransportMode::Truck, FuelType::Diesel)
            .with_weather(WeatherCondition::Extreme)
            .with_capacity_utilization(30.0)
            .with_departure(8, 1);
        let result = calculator.calculate(&input).unwrap();

        assert_relative_eq!(result.co2, 97.0 * 1.6, max_relative = 1e-12);
        let factors = result.adjustment_factors();
        assert_relative_eq!(
            factors.weather + factors.load + factors.traffic,
            0.6,
            max_relative = 1e-12
        );
    }
}

mod sharing {
    use super::*;

    #[test]
    fn test_concurrent_calculations_share_one_table() {
        let table = Arc::new(EmissionFactorTable::seeded());
        let calculator = EmissionsCalculator::new(Arc::clone(&table));
        let expected = calculator
            .calculate(&CalculationInput::new(
                100.0,
                10.0,
                TransportMode::Ship,
                FuelType::Lng,
            ))
            .unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let result = calculator
                            .calculate(&CalculationInput::new(
                                100.0,
                                10.0,
                                TransportMode::Ship,
                                FuelType::Lng,
                            ))
                            .unwrap();
                        assert_eq!(result, expected);
                    }
                });
            }
        });
    }

    #[test]
    fn test_borrowed_table() {
        let calculator = EmissionsCalculator::new(&*DEFAULT_EMISSION_FACTORS);
        let input = CalculationInput::new(100.0, 10.0, TransportMode::Rail, FuelType::Diesel);
        let result = calculator.calculate(&input).unwrap();
        assert_relative_eq!(result.co2, 30.0, max_relative = 1e-12);
    }
}

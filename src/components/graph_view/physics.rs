//! Graph-size-dependent physics tuning.
//!
//! Layout quality depends on how many nodes the simulation has to spread
//! out, so the profile is selected twice: once for the empty initial canvas
//! (n = 0) and again when real data arrives.

use force_graph::SimulationParameters;

/// Simulation parameter bundle for one graph-size tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsProfile {
	/// Iteration budget for the stabilization phase.
	pub stabilization_iterations: u32,
	/// How often stabilization progress is pushed to the UI, in ms.
	pub update_interval_ms: u32,
	/// Node repulsion strength (negative, vis-style convention).
	pub gravitational_constant: f32,
	/// Pull towards the viewport center.
	pub central_gravity: f32,
	/// Spring rest length; grows sub-linearly with node count.
	pub spring_length: f32,
	/// Spring stiffness.
	pub spring_constant: f32,
	/// Velocity damping; higher means the layout settles faster.
	pub damping: f32,
}

/// Rest length the spring tiers are calibrated against.
const BASE_SPRING_LENGTH: f32 = 200.0;

impl PhysicsProfile {
	/// Select the profile for a graph of `n` nodes.
	///
	/// Three tiers (n <= 20, n <= 50, n > 50) trade iteration budget for
	/// damping; the spring length `200 * max(1, sqrt(n / 10))` grows
	/// sub-linearly so dense graphs don't over-expand.
	pub fn for_node_count(n: usize) -> Self {
		let spring_length = BASE_SPRING_LENGTH * (n as f32 / 10.0).sqrt().max(1.0);
		if n <= 20 {
			Self {
				stabilization_iterations: 250,
				update_interval_ms: 25,
				gravitational_constant: -2000.0,
				central_gravity: 0.3,
				spring_length,
				spring_constant: 0.04,
				damping: 0.5,
			}
		} else if n <= 50 {
			Self {
				stabilization_iterations: 350,
				update_interval_ms: 25,
				gravitational_constant: -3000.0,
				central_gravity: 0.25,
				spring_length,
				spring_constant: 0.04,
				damping: 0.6,
			}
		} else {
			Self {
				stabilization_iterations: 500,
				update_interval_ms: 50,
				gravitational_constant: -8000.0,
				central_gravity: 0.2,
				spring_length,
				spring_constant: 0.05,
				damping: 0.7,
			}
		}
	}

	/// Map the profile onto the `force_graph` simulation.
	///
	/// The crate has no explicit rest length, so a longer spring becomes a
	/// proportionally weaker spring force, which widens the settled layout
	/// the same way.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: -self.gravitational_constant * 0.075,
			force_spring: self.spring_constant * (BASE_SPRING_LENGTH / self.spring_length),
			force_max: 280.0,
			node_speed: 3000.0,
			damping_factor: 1.0 - self.damping * 0.4,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn spring_length_formula_holds() {
		for n in [0usize, 1, 5, 10, 20, 40, 50, 100, 500, 1000] {
			let expected = 200.0 * (n as f32 / 10.0).sqrt().max(1.0);
			assert_eq!(PhysicsProfile::for_node_count(n).spring_length, expected);
		}
	}

	#[test]
	fn spring_length_floors_at_200() {
		assert_eq!(PhysicsProfile::for_node_count(0).spring_length, 200.0);
		assert_eq!(PhysicsProfile::for_node_count(10).spring_length, 200.0);
		assert!(PhysicsProfile::for_node_count(11).spring_length > 200.0);
	}

	#[test]
	fn tier_boundaries() {
		let small = PhysicsProfile::for_node_count(20);
		assert_eq!(small.stabilization_iterations, 250);
		assert_eq!(small.damping, 0.5);

		let medium = PhysicsProfile::for_node_count(21);
		assert_eq!(medium.stabilization_iterations, 350);
		assert_eq!(medium.damping, 0.6);
		assert_eq!(PhysicsProfile::for_node_count(50).stabilization_iterations, 350);

		let large = PhysicsProfile::for_node_count(51);
		assert_eq!(large.stabilization_iterations, 500);
		assert_eq!(large.damping, 0.7);
	}

	#[test]
	fn longer_springs_weaken_the_spring_force() {
		let near = PhysicsProfile::for_node_count(10).simulation_parameters();
		let far = PhysicsProfile::for_node_count(1000).simulation_parameters();
		assert!(far.force_spring < near.force_spring);
	}
}

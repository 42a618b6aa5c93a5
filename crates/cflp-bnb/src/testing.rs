// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Shared fixtures for unit tests: the two-facility example, seeded random
//! instances and an exhaustive reference solver.

use cflp_model::{
    evaluate::evaluate_assignment,
    index::{CustomerIndex, FacilityIndex},
    instance::{Instance, InstanceBuilder},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Two facilities (base 10 and 20, 5 bandwidth per stage), two customers of
/// demand 3, distances `[[1, 4], [4, 1]]` and factor 2. The optimum puts
/// both customers on facility 0 at stage 2 for a cost of 25.
pub fn two_facility_example() -> Instance<i64> {
    let f = FacilityIndex::new;
    let c = CustomerIndex::new;
    let mut b = InstanceBuilder::<i64>::new(2, 2);
    b.set_base_opening_cost(f(0), 10)
        .set_base_opening_cost(f(1), 20)
        .set_max_bandwidth_per_stage(f(0), 5)
        .set_max_bandwidth_per_stage(f(1), 5)
        .set_bandwidth_demand(c(0), 3)
        .set_bandwidth_demand(c(1), 3)
        .set_distance(f(0), c(0), 1)
        .set_distance(f(0), c(1), 4)
        .set_distance(f(1), c(0), 4)
        .set_distance(f(1), c(1), 1)
        .set_distance_cost_factor(2);
    b.build()
}

/// A random instance with small values so that stages above 2 occur often.
pub fn random_instance(seed: u64, num_facilities: usize, num_customers: usize) -> Instance<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut b = InstanceBuilder::<i64>::new(num_facilities, num_customers);
    for f in 0..num_facilities {
        let f = FacilityIndex::new(f);
        b.set_base_opening_cost(f, rng.random_range(0..=30))
            .set_max_bandwidth_per_stage(f, rng.random_range(1..=8));
        for c in 0..num_customers {
            b.set_distance(f, CustomerIndex::new(c), rng.random_range(0..=20));
        }
    }
    for c in 0..num_customers {
        b.set_bandwidth_demand(CustomerIndex::new(c), rng.random_range(1..=6));
    }
    b.set_distance_cost_factor(rng.random_range(0..=3));
    b.build()
}

/// Enumerates every completion of `prefix` and returns the cheapest cost,
/// or `None` if there is no facility to complete with.
pub fn brute_force_completion(instance: &Instance<i64>, prefix: &[FacilityIndex]) -> Option<i64> {
    let n = instance.num_customers();
    let m = instance.num_facilities();
    if n > prefix.len() && m == 0 {
        return None;
    }

    let mut assignment: Vec<FacilityIndex> = prefix.to_vec();
    assignment.resize(n, FacilityIndex::new(0));
    let mut best: Option<i64> = None;

    loop {
        let cost = evaluate_assignment(instance, &assignment)
            .expect("fixtures never overflow")
            .objective_value;
        best = Some(best.map_or(cost, |b| b.min(cost)));

        // odometer over the free suffix
        let mut position = n;
        loop {
            if position == prefix.len() {
                return best;
            }
            position -= 1;
            let next = assignment[position].get() + 1;
            if next < m {
                assignment[position] = FacilityIndex::new(next);
                break;
            }
            assignment[position] = FacilityIndex::new(0);
        }
    }
}

/// The optimal cost of `instance`, found by enumerating all assignments.
pub fn brute_force_optimum(instance: &Instance<i64>) -> Option<i64> {
    brute_force_completion(instance, &[])
}

// ============================================================================
// Bisection Square Root Demo
// ============================================================================
//
// Computes square roots to a requested decimal precision by bisection:
// bracket the root, halve the bracket until it is one resolution wide,
// render the lower bound. Run with:
//
//     cargo run --example sqrt_bisection [n] [digits]

use bigfixed::FixedPoint;
use tracing::{debug, info};

fn bisect_sqrt(n: i64, digits: u32) -> String {
    // Four fractional bits per decimal digit keeps the bracket's final
    // resolution well below the last rendered digit.
    let scale = digits * 4;
    let target = FixedPoint::new(n, scale);

    let mut lo = FixedPoint::new(1, scale);
    let mut hi = target.clone();
    let step = lo.resolution();

    let mut iterations = 0u32;
    while &hi - &lo > step {
        let mid = (&lo + &hi) >> 1;
        if &mid * &mid > target {
            hi = mid;
        } else {
            lo = mid;
        }
        iterations += 1;
        if iterations % 256 == 0 {
            debug!(iterations, "bracket narrowed");
        }
    }

    info!(n, digits, scale, iterations, "bisection converged");
    lo.to_decimal_string(digits)
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let n: i64 = args
        .next()
        .map(|a| a.parse().expect("n must be an integer"))
        .unwrap_or(2);
    let digits: u32 = args
        .next()
        .map(|a| a.parse().expect("digits must be a non-negative integer"))
        .unwrap_or(50);

    println!("sqrt({}) to {} digits:", n, digits);
    println!("{}", bisect_sqrt(n, digits));
}

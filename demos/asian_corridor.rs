// demos/asian_corridor.rs
//
// Prices the Asian corridor contract and estimates its spot sensitivity
// with the finite-difference method. There is no closed form and no
// Malliavin weight for the path-average payoff, so the difference quotient
// is the only Greek available here.

use malliavin_greeks::math_utils::Timer;
use malliavin_greeks::{Derivative, Param};

fn main() {
    let asian = Derivative::asian_corridor(100.0, 0.05, 0.2, 1.0, 50.0, 100.0, 365)
        .expect("valid contract");

    let mut timer = Timer::new();
    timer.start();
    let price = asian.price_monte_carlo(20_000, None).expect("pricing succeeds");
    println!(
        "MC Price ({}): {:.6} ({:.0} ms)",
        asian.name(),
        price,
        timer.elapsed_ms()
    );

    timer.start();
    let fd_delta = asian
        .greeks_difference_method(20_000, 0.01, Param::Price0, 1)
        .expect("fd delta");
    println!(
        "FD Delta ({}): {:.6} ({:.0} ms)",
        asian.name(),
        fd_delta,
        timer.elapsed_ms()
    );
}

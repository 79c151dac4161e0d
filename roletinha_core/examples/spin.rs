use roletinha_core::{Face, FairDraw, GameConfig, Session};

fn main() {
    // Example end-to-end seeded spin
    let mut draw = FairDraw::new("example-server-seed", "example-client-seed");
    let mut session = Session::new(GameConfig::classic());
    println!("server_seed_hash={}", draw.server_seed_hash_hex());

    let position = session
        .start_spin(&mut draw, 10, Face::One)
        .expect("stake fits the starting balance");
    let record = session.complete_spin().expect("spin was started above");

    println!(
        "nonce={} position={} landed={} outcome={} change={:+} balance={}",
        draw.nonce(),
        position,
        record.landed,
        record.outcome,
        record.change,
        session.balance()
    );
}

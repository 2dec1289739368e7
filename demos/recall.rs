//! # Hopfield recall demo
//!
//! Trains three 5×5 glyphs, corrupts one of them, and walks the recall
//! history printing the network energy at every flip.
//!
//! ```bash
//! cargo run --example recall
//! ```

use hopfield_core::{GridShape, HopfieldNetwork, Pattern, Spin};

// ── Glyphs ───────────────────────────────────────────────────────────────────

const GRID: GridShape = GridShape { rows: 5, cols: 5 };

fn glyph(rows: [&str; 5]) -> Pattern {
    let cells: Vec<Vec<bool>> = rows
        .iter()
        .map(|r| r.chars().map(|c| c == '#').collect())
        .collect();
    GRID.flatten(&cells).expect("glyph rows are 5 wide")
}

fn letter_t() -> Pattern {
    glyph(["#####", "..#..", "..#..", "..#..", "..#.."])
}

fn letter_l() -> Pattern {
    glyph(["#....", "#....", "#....", "#....", "#####"])
}

fn letter_x() -> Pattern {
    glyph(["#...#", ".#.#.", "..#..", ".#.#.", "#...#"])
}

// ── Display helpers ──────────────────────────────────────────────────────────

fn render(state: &[Spin]) -> Vec<String> {
    GRID.to_rows(state)
        .expect("state matches grid")
        .iter()
        .map(|row| row.iter().map(|&s| if s > 0 { '█' } else { '·' }).collect())
        .collect()
}

fn side_by_side(frames: &[(&str, Vec<String>)]) {
    let header: Vec<String> = frames.iter().map(|(label, _)| format!("{label:<9}")).collect();
    println!("  {}", header.join(" "));
    for r in 0..GRID.rows {
        let line: Vec<String> = frames.iter().map(|(_, f)| format!("{:<9}", f[r])).collect();
        println!("  {}", line.join(" "));
    }
    println!();
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Hopfield associative memory — 5×5 glyph recall           ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    let mut net = HopfieldNetwork::for_grid(GRID);
    let glyphs = [("T", letter_t()), ("L", letter_l()), ("X", letter_x())];
    for (_, g) in &glyphs {
        net.train(g.as_slice()).expect("glyphs are 25 cells");
    }
    println!(
        "▶  Trained {} glyphs on {} neurons (rough capacity {})\n",
        glyphs.len(),
        GRID.len(),
        net.capacity()
    );
    side_by_side(
        &glyphs
            .iter()
            .map(|(name, g)| (*name, render(g.as_slice())))
            .collect::<Vec<_>>(),
    );

    // Corrupt the T in four places.
    let cue = letter_t().with_flipped(&[1, 7, 18, 24]).expect("indices within grid");
    let weights = net.weights().expect("trained");
    let outcome = net.predict(cue.as_slice(), None).expect("recall converges");

    println!(
        "▶  Recall from a corrupted T: {} evaluations, {} flips\n",
        outcome.evaluations(),
        outcome.flips
    );

    let mut frames = vec![("cue", render(&outcome.initial_state))];
    let mut prev = outcome.initial_state.clone();
    for (step, state) in outcome.history.iter().enumerate() {
        if state != prev.as_slice() {
            println!("  step {:>3}  E = {:>7.3}", step, weights.energy(state));
            prev = state.to_vec();
        }
    }
    frames.push(("recalled", render(&outcome.final_state)));
    println!();
    side_by_side(&frames);

    match net.closest_pattern(&outcome.final_state) {
        Some(m) if m.distance == 0 => println!("✓  Recovered {}", glyphs[m.index].0),
        Some(m) => println!(
            "~  Settled {} cells away from {} (spurious state)",
            m.distance, glyphs[m.index].0
        ),
        None => println!("?  No stored glyph to compare against"),
    }
}

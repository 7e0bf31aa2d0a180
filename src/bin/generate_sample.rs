//! Writes a synthetic `final_catalogue.csv` for trying out the dashboard.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Pick from `items` with the given relative weights.
    fn weighted<'a>(&mut self, items: &[(&'a str, u32)]) -> &'a str {
        let total: u32 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.below(total as usize) as u32;
        for &(item, w) in items {
            if roll < w {
                return item;
            }
            roll -= w;
        }
        items[items.len() - 1].0
    }
}

const LANGUAGES: [(&str, u32); 5] = [
    ("Telugu", 60),
    ("English", 20),
    ("Sanskrit", 10),
    ("Hindi", 6),
    ("Tamil", 4),
];

const CATEGORIES: [&str; 8] = [
    "Literature",
    "History",
    "Poetry",
    "Drama",
    "Religion",
    "Science",
    "Biography",
    "Children",
];

const AUTHORS: [&str; 12] = [
    "Viswanatha Satyanarayana",
    "Gurajada Apparao",
    "Sri Sri",
    "Kandukuri Veeresalingam",
    "Chalam",
    "Kodavatiganti Kutumbarao",
    "Rachakonda Viswanatha Sastry",
    "Yandamuri Veerendranath",
    "Malladi Venkata Krishna Murthy",
    "Volga",
    "Tripuraneni Gopichand",
    "Unnava Lakshminarayana",
];

const PUBLISHERS: [&str; 5] = [
    "Visalaandhra",
    "Emesco",
    "Navodaya",
    "Andhra Saraswata Parishattu",
    "Telugu Akademi",
];

const TITLE_WORDS: [&str; 14] = [
    "Veyi", "Padagalu", "Kathalu", "Ramayanam", "Charitra", "Kavitalu", "Jeevitham",
    "Prapancham", "Mahaprasthanam", "Kanyasulkam", "Vishadam", "Swapnam", "Yatra", "Gathalu",
];

const ROWS: usize = 2000;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "final_catalogue.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Book Title",
        "Author(s)",
        "Language",
        "Category",
        "Year",
        "Publisher",
    ])?;

    for _ in 0..ROWS {
        let words = 1 + rng.below(3);
        let title: Vec<&str> = (0..words)
            .map(|_| TITLE_WORDS[rng.below(TITLE_WORDS.len())])
            .collect();

        // Roughly one in ten records misses its author or year.
        let author = if rng.below(10) == 0 {
            "unknown"
        } else {
            AUTHORS[rng.below(AUTHORS.len())]
        };
        let year = if rng.below(10) == 0 {
            String::new()
        } else {
            (1880 + rng.below(140)).to_string()
        };

        writer.write_record([
            title.join(" ").as_str(),
            author,
            rng.weighted(&LANGUAGES),
            CATEGORIES[rng.below(CATEGORIES.len())],
            year.as_str(),
            PUBLISHERS[rng.below(PUBLISHERS.len())],
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} books to {output_path}");
    Ok(())
}

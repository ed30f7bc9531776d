use std::sync::Arc;

use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (team, position, surname, first name, typical V0, typical F0)
const ATHLETES: [(&str, &str, &str, &str, f64, f64); 10] = [
    ("Pro", "Ailier", "DUPONT", "Jean", 9.6, 7.4),
    ("Pro", "Ailier", "MARTIN", "Paul", 9.9, 8.1),
    ("Pro", "Centre", "DURAND", "Luc", 9.1, 8.0),
    ("Pro", "Pilier", "PETIT", "Hugo", 7.9, 9.0),
    ("Pro", "Arrière", "LEROY", "Marc", 9.4, 7.6),
    ("Espoirs", "Ailier", "MOREAU", "Théo", 9.3, 7.2),
    ("Espoirs", "Centre", "GIRARD", "Noah", 8.8, 7.9),
    ("Espoirs", "Pilier", "BONNET", "Louis", 7.6, 8.6),
    ("Espoirs", "Talonneur", "ROUSSEAU", "Enzo", 8.2, 8.3),
    ("Espoirs", "Arrière", "FONTAINE", "Jules", 9.2, 7.7),
];

/// Test sessions as days since 1970-01-01 (2023-09-12 and 2024-01-16).
const TEST_DAYS: [i32; 2] = [19612, 19738];

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut teams = Vec::new();
    let mut positions = Vec::new();
    let mut sprints = Vec::new();
    let mut dates = Vec::new();
    let mut full_names = Vec::new();
    let mut surnames = Vec::new();
    let mut v0s = Vec::new();
    let mut f0s = Vec::new();

    for (session, &day) in TEST_DAYS.iter().enumerate() {
        // Small training effect between sessions.
        let gain = 1.0 + 0.015 * session as f64;
        for &(team, position, surname, first_name, v0, f0) in &ATHLETES {
            for sprint in 1..=2_i64 {
                teams.push(team);
                positions.push(position);
                sprints.push(sprint);
                dates.push(day);
                full_names.push(format!("{surname} {first_name}"));
                surnames.push(surname);
                v0s.push(round2(v0 * gain + rng.gen_range(-0.25..0.25)));
                f0s.push(round2(f0 * gain + rng.gen_range(-0.30..0.30)));
            }
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Equipes", DataType::Utf8, false),
        Field::new("Poste", DataType::Utf8, false),
        Field::new("Num Sprint", DataType::Int64, false),
        Field::new("Date du test", DataType::Date32, false),
        Field::new("NOM Prénom", DataType::Utf8, false),
        Field::new("NOM", DataType::Utf8, false),
        Field::new("V0 (m/s)", DataType::Float64, false),
        Field::new("F0 (N/kg)", DataType::Float64, false),
    ]));

    let n_rows = v0s.len();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(teams)),
            Arc::new(StringArray::from(positions)),
            Arc::new(Int64Array::from(sprints)),
            Arc::new(Date32Array::from(dates)),
            Arc::new(StringArray::from(full_names)),
            Arc::new(StringArray::from(surnames)),
            Arc::new(Float64Array::from(v0s)),
            Arc::new(Float64Array::from(f0s)),
        ],
    )?;

    let output_path = "sample_fv.parquet";
    let file = std::fs::File::create(output_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {n_rows} sprint tests to {output_path}");
    Ok(())
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// Criterion benchmarks for vida-screen

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vida_screen::core::{
    bmi::compute_bmi,
    interpret::{interpret, LabelEncoder, KNOWN_LABELS},
    schema::FeatureSchema,
    translate::translate,
};
use vida_screen::models::RawPatientInput;

fn sample_input() -> RawPatientInput {
    RawPatientInput {
        gender: "Feminino".to_string(),
        age: 32,
        height_m: 1.62,
        weight_kg: 84.0,
        family_history: "Sim".to_string(),
        high_calorie_food: "Sim".to_string(),
        vegetable_freq: 2.0,
        main_meals: 3.0,
        between_meals: "Frequentemente".to_string(),
        smoker: "Não".to_string(),
        water_intake: 2.0,
        calorie_monitoring: "Não".to_string(),
        activity_freq: 0.0,
        device_time: 2.0,
        alcohol: "Às vezes".to_string(),
        transport: "Carro".to_string(),
    }
}

fn bench_compute_bmi(c: &mut Criterion) {
    c.bench_function("compute_bmi", |b| {
        b.iter(|| compute_bmi(black_box(84.0), black_box(1.62)));
    });
}

fn bench_translate(c: &mut Criterion) {
    let schema = FeatureSchema::canonical();
    let input = sample_input();

    c.bench_function("translate_canonical_schema", |b| {
        b.iter(|| translate(black_box(&input), black_box(&schema)));
    });
}

fn bench_interpret(c: &mut Criterion) {
    let encoder = LabelEncoder::new(KNOWN_LABELS.iter().map(|l| l.to_string()).collect());

    c.bench_function("interpret_class_code", |b| {
        b.iter(|| interpret(black_box(4), black_box(&encoder)));
    });
}

criterion_group!(benches, bench_compute_bmi, bench_translate, bench_interpret);
criterion_main!(benches);

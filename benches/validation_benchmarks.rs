use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tdls_language_server::validate_document;
use tdls_language_server::grammar::PatternLibrary;

/// Generate script content with specific validation scenarios
fn generate_script(lines: usize, scenario: &str) -> Vec<String> {
    let mut content = Vec::new();

    match scenario {
        "all_valid" => {
            for i in 0..lines {
                content.push(format!(
                    "-<calm>{{smile}} Speaker{} [{}]: Line number {}",
                    i % 7,
                    i % 3,
                    i
                ));
            }
        }
        "missing_colon" => {
            for i in 0..lines {
                if i % 3 == 0 {
                    content.push(format!("- Speaker{} forgot the colon", i));
                } else {
                    content.push(format!("- Speaker{}: fine", i));
                }
            }
        }
        "missing_character" => {
            for i in 0..lines {
                if i % 4 == 0 {
                    content.push(format!("-<sad>: nobody said line {}", i));
                } else {
                    content.push(format!("- Speaker{}: fine", i));
                }
            }
        }
        "mixed" => {
            for i in 0..lines {
                match i % 8 {
                    0..=2 => content.push(format!("- Alice: line {}", i)),
                    3 => content.push("- no colon".to_string()),
                    4 => content.push("- (aside): whispered".to_string()),
                    5 => content.push(format!("@#wait {}", i)),
                    6 => content.push(String::new()),
                    7 => content.push("Chapter heading".to_string()),
                    _ => unreachable!(),
                }
            }
        }
        _ => {
            for i in 0..lines {
                content.push(format!("- Alice: {}", i));
            }
        }
    }

    content
}

/// Benchmark validation with different error densities
fn bench_validation_error_density(c: &mut Criterion) {
    let scenarios = ["all_valid", "missing_colon", "missing_character", "mixed"];

    let mut group = c.benchmark_group("validation_error_density");

    for scenario in scenarios {
        let content_lines = generate_script(5000, scenario);
        let content = content_lines.join("\n");

        group.throughput(Throughput::Elements(content_lines.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", scenario),
            &content,
            |b, content| {
                b.iter(|| {
                    let result = validate_document(black_box(content), black_box(usize::MAX));
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark validation scalability with different file sizes
fn bench_validation_scalability(c: &mut Criterion) {
    let file_sizes = [100, 1_000, 10_000, 50_000];

    let mut group = c.benchmark_group("validation_scalability");

    for &size in &file_sizes {
        let content = generate_script(size, "mixed").join("\n");

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("size", size), &content, |b, content| {
            b.iter(|| {
                let result = validate_document(black_box(content), black_box(usize::MAX));
                black_box(result)
            })
        });
    }

    group.finish();
}

/// The default cap of 100 stops the scan early on error-heavy documents
fn bench_problem_cap(c: &mut Criterion) {
    let content = generate_script(50_000, "missing_colon").join("\n");

    let mut group = c.benchmark_group("problem_cap");
    for cap in [100, 1_000, usize::MAX] {
        group.bench_with_input(BenchmarkId::new("cap", cap), &cap, |b, &cap| {
            b.iter(|| black_box(validate_document(black_box(&content), cap)))
        });
    }
    group.finish();
}

fn bench_dialogue_grammar(c: &mut Criterion) {
    let patterns = PatternLibrary::shared();
    let lines = [
        "- Alice: Hello there",
        "-<happy>{smile} Alice [2]: Hi",
        "- (stage direction) Bob: psst",
        "- Alice Bob: not a speaker",
    ];

    c.bench_function("dialogue_grammar", |b| {
        b.iter(|| {
            for line in &lines {
                let stripped = patterns.strip_comment(black_box(line));
                black_box(patterns.match_dialogue(&stripped).map(|m| m.character.is_some()));
            }
        })
    });
}

criterion_group!(
    validation_benches,
    bench_validation_error_density,
    bench_validation_scalability,
    bench_problem_cap,
    bench_dialogue_grammar
);

criterion_main!(validation_benches);

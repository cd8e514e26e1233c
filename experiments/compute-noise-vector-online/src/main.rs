use nvec_base::archive::{read_all, write_entry};
use nvec_base::Matrix;
use nvec_estimator::Estimator;
use nvec_offline::classify_speech_rows;
use nvec_prior::Prior;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} <feats-path> <targets-path> <prior-path> <period> <vec-path>"
    );
}

struct Args {
    feats_path: String,
    targets_path: String,
    prior_path: String,
    period: usize,
    vec_path: String,
}

fn parse_args(argv: &[String]) -> Option<Args> {
    if argv.len() != 5 {
        return None;
    }
    let period: usize = argv[3].parse().ok().filter(|p| *p > 0)?;
    Some(Args {
        feats_path: argv[0].clone(),
        targets_path: argv[1].clone(),
        prior_path: argv[2].clone(),
        period,
        vec_path: argv[4].clone(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    nvec_base::init_stdout_logger();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv
        .first()
        .cloned()
        .unwrap_or_else(|| "compute-noise-vector-online".to_string());
    let Some(args) = parse_args(&argv[1..]) else {
        print_usage(&program);
        std::process::exit(1);
    };

    let prior = nvec_prior::read_text(&mut BufReader::new(File::open(&args.prior_path)?))?;

    let feat_entries = read_all(&mut BufReader::new(File::open(&args.feats_path)?))?;
    let target_entries: HashMap<String, Matrix> =
        read_all(&mut BufReader::new(File::open(&args.targets_path)?))?
            .into_iter()
            .collect();

    let mut writer = BufWriter::new(File::create(&args.vec_path)?);
    let mut num_done = 0u32;
    let mut num_err = 0u32;

    for (key, feats) in feat_entries {
        if feats.rows() == 0 {
            log::warn!("empty feature matrix for utterance {key}");
            num_err += 1;
            continue;
        }

        let mut estimator = match Estimator::new(prior.clone(), args.period) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("{key}: {e}");
                num_err += 1;
                continue;
            }
        };

        let result = match target_entries.get(&key) {
            None => {
                log::warn!(
                    "no target found for utterance {key}; getting noise vector from prior estimate"
                );
                num_err += 1;
                estimator.extract(&feats, None)
            }
            Some(targets) => {
                if targets.rows() != feats.rows() {
                    log::warn!(
                        "mismatch in number of frames ({} for features and {} for targets) for utterance {key}; creating vector from prior estimate",
                        feats.rows(),
                        targets.rows()
                    );
                    num_err += 1;
                    estimator.extract(&feats, None)
                } else {
                    let labels = classify_speech_rows(targets);
                    estimator.extract(&feats, Some(&labels))
                }
            }
        };

        match result {
            Ok(noise_vectors) => {
                write_entry(&mut writer, &key, &noise_vectors)?;
                num_done += 1;
            }
            Err(e) => {
                log::warn!("{key}: {e}");
                num_err += 1;
            }
        }
    }

    use std::io::Write;
    writer.flush()?;
    log::info!(
        "done computing average noise frames; processed {num_done} utterances, {num_err} had errors"
    );

    if num_done == 0 {
        std::process::exit(1);
    }
    Ok(())
}

use nvec_base::archive::{read_all, write_entry};
use nvec_base::Matrix;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} [--concat-speech-vector] <feats-path> [<targets-path>] <vec-path>"
    );
}

struct Args {
    concat_speech_vector: bool,
    feats_path: String,
    targets_path: Option<String>,
    vec_path: String,
}

fn parse_args(argv: &[String]) -> Option<Args> {
    let mut concat_speech_vector = false;
    let mut positional = Vec::new();
    for arg in argv {
        match arg.as_str() {
            "--concat-speech-vector" | "--concat-speech-vector=true" => concat_speech_vector = true,
            "--concat-speech-vector=false" => concat_speech_vector = false,
            other => positional.push(other.to_string()),
        }
    }
    match positional.len() {
        2 => Some(Args {
            concat_speech_vector,
            feats_path: positional[0].clone(),
            targets_path: None,
            vec_path: positional[1].clone(),
        }),
        3 => Some(Args {
            concat_speech_vector,
            feats_path: positional[0].clone(),
            targets_path: Some(positional[1].clone()),
            vec_path: positional[2].clone(),
        }),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    nvec_base::init_stdout_logger();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().cloned().unwrap_or_else(|| "compute-noise-vector".to_string());
    let Some(args) = parse_args(&argv[1..]) else {
        print_usage(&program);
        std::process::exit(1);
    };

    let feat_entries = read_all(&mut BufReader::new(File::open(&args.feats_path)?))?;
    let target_entries: HashMap<String, Matrix> = match &args.targets_path {
        Some(path) => read_all(&mut BufReader::new(File::open(path)?))?.into_iter().collect(),
        None => HashMap::new(),
    };

    let mut writer = BufWriter::new(File::create(&args.vec_path)?);
    let mut num_done = 0u32;
    let mut num_err = 0u32;

    for (key, feats) in feat_entries {
        let targets = if args.targets_path.is_some() {
            match target_entries.get(&key) {
                Some(t) => Some(t),
                None => {
                    log::warn!("no target found for utterance {key}");
                    num_err += 1;
                    continue;
                }
            }
        } else {
            None
        };

        match nvec_offline::compute_offline_nvector(&feats, targets, args.concat_speech_vector) {
            Ok(vector) => {
                let as_matrix = Matrix::from_rows(vec![vector.into_vec()]);
                write_entry(&mut writer, &key, &as_matrix)?;
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
    log::info!("done computing average noise frames; processed {num_done} utterances, {num_err} had errors");

    if num_done == 0 {
        std::process::exit(1);
    }
    Ok(())
}

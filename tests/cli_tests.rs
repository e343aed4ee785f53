//! Command-line behavior of the `chromdetect` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::TempDir;

const ASSEMBLY: &str = "\
>chr1 first
GCGCGCGCATATATAT
GCGCGCGCATATATAT
>chr2
ATATATATATATATATATATATAT
>ctg1
ACGT
";

fn chromdetect() -> Command {
    Command::cargo_bin("chromdetect").unwrap()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn assembly(dir: &TempDir) -> PathBuf {
    write_file(dir.path(), "assembly.fa", ASSEMBLY)
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_classify_json() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    let value = json_stdout(
        chromdetect()
            .args(["--format", "json", "classify", "--quiet"])
            .arg(&input),
    );

    assert_eq!(value["summary"]["total_scaffolds"], 3);
    assert_eq!(value["summary"]["chromosome_count"], 2);
    assert_eq!(value["scaffolds"][0]["name"], "chr1");
    assert_eq!(value["scaffolds"][0]["length"], 32);
    assert_eq!(value["scaffolds"][0]["classification"], "chromosome");
    assert_eq!(value["scaffolds"][0]["detection_method"], "name_chr_explicit");
    assert_eq!(value["scaffolds"][0]["chromosome_id"], "1");
    assert_eq!(value["scaffolds"][0]["gc_content"], 0.5);
    assert_eq!(value["scaffolds"][2]["classification"], "unplaced");
}

#[test]
fn test_classify_summary_is_default() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    chromdetect()
        .arg("classify")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("CHROMDETECT ASSEMBLY ANALYSIS"))
        .stdout(predicate::str::contains("Top 20 Scaffolds"))
        .stderr(predicate::str::contains("Found 3 scaffolds"));
}

#[test]
fn test_classify_tsv_bed_gff() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    chromdetect()
        .args(["-f", "tsv", "classify", "-q"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name\tlength\tclassification\tconfidence\tmethod\tchromosome_id\tgc_content\n",
        ))
        .stdout(predicate::str::contains("chr2\t24\tchromosome\t0.9\tname_chr_explicit\t2\t0.0000"));

    chromdetect()
        .args(["-f", "bed", "classify", "-q"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("chr1\t0\t32\tchromosome\t900\t."))
        .stdout(predicate::str::contains("ctg1\t0\t4\tunplaced\t600\t."));

    chromdetect()
        .args(["-f", "gff", "classify", "-q"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("##gff-version 3\n"))
        .stdout(predicate::str::contains(
            "chr1\tchromdetect\tregion\t1\t32\t0.9\t.\t.\tID=chr1;classification=chromosome",
        ));
}

#[test]
fn test_classify_from_stdin() {
    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-", "-q"])
            .write_stdin(ASSEMBLY),
    );
    assert_eq!(value["summary"]["total_scaffolds"], 3);
}

#[test]
fn test_classify_gzipped_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assembly.fa.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(ASSEMBLY.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let value = json_stdout(chromdetect().args(["-f", "json", "classify", "-q"]).arg(&path));
    assert_eq!(value["summary"]["chromosome_count"], 2);
}

#[test]
fn test_filters_apply_to_output_only() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--chromosomes-only"])
            .arg(&input),
    );
    assert_eq!(value["scaffolds"].as_array().unwrap().len(), 2);
    assert_eq!(value["summary"]["total_scaffolds"], 3);

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--min-length", "30"])
            .arg(&input),
    );
    assert_eq!(value["scaffolds"].as_array().unwrap().len(), 1);
}

#[test]
fn test_min_confidence_out_of_range() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    chromdetect()
        .args(["classify", "--min-confidence", "1.5"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0.0 and 1.0"));
}

#[test]
fn test_karyotype_demotes_extra_chromosomes() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "-k", "1"])
            .arg(&input),
    );
    assert_eq!(value["summary"]["chromosome_count"], 1);
    assert_eq!(value["scaffolds"][0]["classification"], "unplaced");
    assert_eq!(
        value["scaffolds"][0]["detection_method"],
        "name_chr_explicit_demoted_karyotype"
    );
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);
    let out = dir.path().join("results.json");

    chromdetect()
        .args(["-f", "json", "classify"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Results written to"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["summary"]["total_scaffolds"], 3);
}

#[test]
fn test_custom_patterns() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "custom.fa", ">Pseudo_7\nACGTACGT\n>Pseudo_8\nACGT\n");
    let patterns = write_file(
        dir.path(),
        "patterns.json",
        r#"{"chromosome_patterns": [{"pattern": "Pseudo_(\\d+)", "name": "pseudo"}]}"#,
    );

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--patterns"])
            .arg(&patterns)
            .arg(&input),
    );
    assert_eq!(value["scaffolds"][0]["detection_method"], "name_pseudo");
    assert_eq!(value["scaffolds"][0]["chromosome_id"], "7");
    assert_eq!(value["summary"]["chromosome_count"], 2);
}

#[test]
fn test_invalid_patterns_file() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);
    let patterns = write_file(
        dir.path(),
        "patterns.json",
        r#"{"chromosome_patterns": [{"pattern": "Pseudo_(\\d+)"}]}"#,
    );

    chromdetect()
        .args(["classify", "--patterns"])
        .arg(&patterns)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid patterns file"));

    let yaml = write_file(
        dir.path(),
        "patterns.yaml",
        "chromosome_patterns:\n  - pattern: 'Pseudo_(\\d+)'\n",
    );
    chromdetect()
        .args(["classify", "--patterns"])
        .arg(&yaml)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid patterns file"));
}

#[test]
fn test_yaml_patterns() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "custom.fa", ">Pseudo_7\nACGTACGT\n>Pseudo_8\nACGT\n");
    let patterns = write_file(
        dir.path(),
        "patterns.yml",
        "chromosome_patterns:\n  - pattern: 'Pseudo_(\\d+)'\n    name: pseudo\n",
    );

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--patterns"])
            .arg(&patterns)
            .arg(&input),
    );
    assert_eq!(value["scaffolds"][0]["detection_method"], "name_pseudo");
    assert_eq!(value["scaffolds"][1]["chromosome_id"], "8");
}

#[test]
fn test_assembly_report() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "report_assembly.fa",
        ">scaffold_a\nACGTACGTACGT\n>scaffold_b\nACGT\n>scaffold_c\nAC\n",
    );
    let report = write_file(
        dir.path(),
        "assembly_report.txt",
        "# Assembly name:  toy\n\
         # Sequence-Name\tSequence-Role\tAssigned-Molecule\tAssigned-Molecule-Location/Type\tGenBank-Accn\tRelationship\tRefSeq-Accn\tAssembly-Unit\tSequence-Length\tUCSC-style-name\n\
         scaffold_a\tassembled-molecule\t1\tChromosome\tCM1.1\t=\tNC_1.1\tPrimary Assembly\t12\tna\n\
         scaffold_b\tunlocalized-scaffold\t1\tChromosome\tKI1.1\t=\tna\tPrimary Assembly\t4\tna\n\
         scaffold_c\tunplaced-scaffold\tna\tna\tKI2.1\t=\tna\tPrimary Assembly\t2\tna\n",
    );

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--assembly-report"])
            .arg(&report)
            .arg(&input),
    );
    let scaffolds = &value["scaffolds"];
    assert_eq!(scaffolds[0]["classification"], "chromosome");
    assert_eq!(scaffolds[0]["detection_method"], "ncbi_report");
    assert_eq!(scaffolds[0]["confidence"], 0.99);
    assert_eq!(scaffolds[0]["chromosome_id"], "1");
    assert_eq!(scaffolds[1]["classification"], "unlocalized");
    assert_eq!(scaffolds[2]["classification"], "unplaced");
}

#[test]
fn test_extract_chromosomes() {
    let dir = TempDir::new().unwrap();
    let input = assembly(&dir);
    let extracted = dir.path().join("chromosomes.fa");

    chromdetect()
        .args(["classify", "-q", "--extract-chromosomes"])
        .arg(&extracted)
        .arg(&input)
        .assert()
        .success();

    let text = fs::read_to_string(&extracted).unwrap();
    assert!(text.contains(">chr1"));
    assert!(text.contains(">chr2"));
    assert!(!text.contains(">ctg1"));
    assert!(text.contains("GCGCGCGCATATATATGCGCGCGCATATATAT"));
}

#[test]
fn test_missing_and_empty_input() {
    chromdetect()
        .args(["classify", "/nonexistent/assembly.fa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read FASTA"));

    let dir = TempDir::new().unwrap();
    let empty = write_file(dir.path(), "empty.fa", "");
    chromdetect()
        .arg("classify")
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequences found"));
}

#[test]
fn test_batch() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "alpha.fa", ASSEMBLY);
    write_file(dir.path(), "beta.fasta", ">LG1\nACGTACGT\n>contig_2\nAC\n");
    write_file(dir.path(), "broken.fa", "");
    write_file(dir.path(), "notes.txt", "not an assembly\n");
    let out = dir.path().join("results");

    chromdetect()
        .args(["-f", "tsv", "batch"])
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("[1/3] Processing alpha.fa"))
        .stderr(predicate::str::contains("Batch complete: 2/3 files processed"));

    assert!(out.join("alpha.tsv").exists());
    assert!(out.join("beta.tsv").exists());
    assert!(!out.join("notes.tsv").exists());

    let summary = fs::read_to_string(out.join("batch_summary.tsv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "file\tscaffolds\tchromosomes\ttotal_length\tn50\terror");
    assert_eq!(lines[1], "alpha.fa\t3\t2\t60\t32\t");
    assert!(lines[2].starts_with("beta.fasta\t2\t1\t10\t8\t"));
    assert!(lines[3].starts_with("broken.fa\t\t\t\t\t"));
    assert!(lines[3].contains("No sequences found"));
}

#[test]
fn test_batch_without_fasta_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "notes.txt", "nothing here\n");

    chromdetect()
        .arg("batch")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No FASTA files found"));
}

#[test]
fn test_compare() {
    let dir = TempDir::new().unwrap();
    let first = write_file(dir.path(), "first.fa", ASSEMBLY);
    let second = write_file(
        dir.path(),
        "second.fa",
        ">chr1\nGCGCGCGCATATATATGCGCGCGC\n>chr3\nACGTACGTACGT\n>chr2\nAC\n",
    );

    chromdetect()
        .arg("compare")
        .arg(&first)
        .arg(&second)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("ASSEMBLY COMPARISON"))
        .stdout(predicate::str::contains("Assembly 1: first"));

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "compare", "-q"])
            .arg(&first)
            .arg(&second),
    );
    assert_eq!(value["comparison"]["assembly2_name"], "second");
    assert_eq!(value["comparison"]["unique_to_2"][0], "chr3");
    assert_eq!(value["comparison"]["size_differences"]["chr1"], -8);
    assert_eq!(value["summary"]["total_shared_chromosomes"], 2);

    chromdetect()
        .args(["-f", "bed", "compare"])
        .arg(&first)
        .arg(&second)
        .assert()
        .failure();
}

#[test]
fn test_telomeres() {
    let dir = TempDir::new().unwrap();
    let sequence = format!(
        "{}{}{}",
        "CCCTAA".repeat(6),
        "ACGTTGCA".repeat(10),
        "TTAGGG".repeat(6)
    );
    let input = write_file(
        dir.path(),
        "telomeres.fa",
        &format!(">chr1\n{sequence}\n>ctg1\n{}\n", "ACGTTGCA".repeat(20)),
    );

    chromdetect()
        .arg("telomeres")
        .arg(&input)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("TELOMERE DETECTION"))
        .stdout(predicate::str::contains("Complete (T2T):      1 (50.0%)"));

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "telomeres", "-q"])
            .arg(&input),
    );
    assert_eq!(value["scaffolds"][0]["is_complete"], true);
    assert_eq!(value["scaffolds"][0]["organism_type"], "vertebrate");
    assert_eq!(value["scaffolds"][1]["has_telomere"], false);
    assert_eq!(value["summary"]["with_telomere"], 1);
}

#[test]
fn test_patterns_listing_and_export() {
    chromdetect()
        .arg("patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("chr_explicit"))
        .stdout(predicate::str::contains("Fragment patterns"));

    let value = json_stdout(chromdetect().args(["-f", "json", "patterns"]));
    assert_eq!(value["chromosome_patterns"][0]["name"], "chr_explicit");
    assert!(value["unlocalized_patterns"].as_array().unwrap().len() > 1);
}

#[test]
fn test_exported_patterns_reload() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("exported.json");
    let input = assembly(&dir);

    chromdetect()
        .args(["-f", "json", "patterns", "-o"])
        .arg(&exported)
        .assert()
        .success();

    let value = json_stdout(
        chromdetect()
            .args(["-f", "json", "classify", "-q", "--append-patterns", "--patterns"])
            .arg(&exported)
            .arg(&input),
    );
    assert_eq!(value["summary"]["chromosome_count"], 2);
}

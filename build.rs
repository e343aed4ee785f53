use std::path::Path;

fn main() {
    let registry_path = Path::new("patterns/builtin.json");
    validate_registry_file(registry_path);
    set_build_dependencies();
}

fn validate_registry_file(registry_path: &Path) {
    // Ensure the registry exists at build time
    assert!(
        registry_path.exists(),
        "\n\nPATTERN REGISTRY BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the built-in pattern file before building.\n",
        registry_path.display()
    );

    let contents = std::fs::read_to_string(registry_path).unwrap_or_else(|e| {
        panic!(
            "\n\nPATTERN REGISTRY BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            registry_path.display()
        );
    });

    let registry: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nPATTERN REGISTRY BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or unescaped backslashes.\n",
            registry_path.display()
        );
    });

    validate_registry_structure(&registry);
}

fn validate_registry_structure(registry: &serde_json::Value) {
    assert!(
        registry.is_object(),
        "\n\nPATTERN REGISTRY BUILD ERROR: Root must be a JSON object\n\
         Got: {registry}\n"
    );

    let chromosome = registry.get("chromosome_patterns").unwrap_or_else(|| {
        panic!(
            "\n\nPATTERN REGISTRY BUILD ERROR: Missing 'chromosome_patterns' field\n\
             The registry must have a top-level 'chromosome_patterns' array.\n"
        );
    });

    let rules = chromosome.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nPATTERN REGISTRY BUILD ERROR: 'chromosome_patterns' must be an array\n\
             Got: {chromosome}\n"
        );
    });

    for (i, rule) in rules.iter().enumerate() {
        validate_chromosome_rule(rule, i);
    }

    let unlocalized = validate_string_list(registry, "unlocalized_patterns");
    let fragment = validate_string_list(registry, "fragment_patterns");

    println!(
        "cargo:warning=Validated pattern registry: {} chromosome, {unlocalized} unlocalized, {fragment} fragment patterns",
        rules.len()
    );
}

fn validate_chromosome_rule(rule: &serde_json::Value, index: usize) {
    let name = rule
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    assert!(
        rule.get("pattern").and_then(serde_json::Value::as_str).is_some(),
        "\n\nPATTERN REGISTRY BUILD ERROR: Chromosome rule '{name}' (index {index}) missing 'pattern' string\n"
    );
    assert!(
        rule.get("name").and_then(serde_json::Value::as_str).is_some(),
        "\n\nPATTERN REGISTRY BUILD ERROR: Chromosome rule at index {index} missing 'name' string\n"
    );
}

fn validate_string_list(registry: &serde_json::Value, field: &str) -> usize {
    let Some(value) = registry.get(field) else {
        return 0;
    };

    let items = value.as_array().unwrap_or_else(|| {
        panic!("\n\nPATTERN REGISTRY BUILD ERROR: '{field}' must be an array\nGot: {value}\n");
    });

    for (i, item) in items.iter().enumerate() {
        assert!(
            item.is_string(),
            "\n\nPATTERN REGISTRY BUILD ERROR: '{field}' entry {i} must be a string\n"
        );
    }

    items.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the registry changes
    println!("cargo:rerun-if-changed=patterns/builtin.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}

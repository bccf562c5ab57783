// ============================================================================
// LingoSync - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English message table
// 边界:
//   - ✅ English message strings
//   - ❌ Should not contain lookup logic
//   - ❌ Should not contain other languages
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Translate command
    ("translate.start", "Translating from '{}' into {} language(s)..."),
    (
        "translate.no_languages",
        "No target languages configured; set [translate].languages or pass --languages",
    ),
    ("translate.missing_api_key", "Environment variable {} is not set"),
    ("translate.using_model", "Using model {}"),
    ("translate.plan_header", "Pending jobs:"),
    ("translate.plan_job", "{} ({} keys)"),
    ("translate.dry_run_done", "Dry run: {} job(s) pending, {} up to date"),
    ("translate.nothing_to_do", "All catalogs are up to date"),
    ("translate.jobs_progress", "jobs"),
    ("translate.job_published", "{} {} translated, {} kept source text"),
    ("translate.job_abandoned", "{} abandoned: {}"),
    ("translate.error_log_hint", "Failure details were appended to {}"),
    // Run summary
    ("summary.title", "Translation summary"),
    ("summary.jobs", "Jobs: {}"),
    ("summary.translated", "Translated keys: {}"),
    ("summary.failed", "Failed keys (kept source text): {}"),
    ("summary.abandoned", "Abandoned jobs: {}"),
    ("summary.up_to_date", "Up to date: {}"),
    ("summary.skipped", "Skipped (missing or unreadable source): {}"),
    ("summary.duration", "Duration: {}s"),
    // Cache command
    ("cache.generate_start", "Rebuilding fingerprints from existing translations..."),
    ("cache.generate_done", "Fingerprints rebuilt: {} file(s), {} key(s)"),
    ("cache.delete_done", "Removed keys from {} in: {}"),
    ("cache.delete_none", "No cached language contains {}"),
    // Init command
    ("init.start", "Initializing LingoSync configuration..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite the existing file"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Edit [translate].languages, export your API key, then run `lingosync translate`",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
    // Probe command
    ("probe.asking", "Asking {}..."),
    ("probe.answer", "Answer:"),
    ("probe.failed", "Request failed: {}"),
];

// ============================================================================
// LingoSync - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文消息表
// 边界:
//   - ✅ 中文消息文本
//   - ❌ 不应包含查找逻辑
//   - ❌ 不应包含其他语言
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 翻译命令
    ("translate.start", "从 '{}' 翻译到 {} 种语言..."),
    (
        "translate.no_languages",
        "未配置目标语言，请设置 [translate].languages 或使用 --languages",
    ),
    ("translate.missing_api_key", "环境变量 {} 未设置"),
    ("translate.using_model", "使用模型 {}"),
    ("translate.plan_header", "待处理任务："),
    ("translate.plan_job", "{}（{} 个 key）"),
    ("translate.dry_run_done", "预演：{} 个任务待处理，{} 个已是最新"),
    ("translate.nothing_to_do", "所有文案均已是最新"),
    ("translate.jobs_progress", "任务"),
    ("translate.job_published", "{} 已翻译 {} 个，{} 个保留原文"),
    ("translate.job_abandoned", "{} 已放弃：{}"),
    ("translate.error_log_hint", "失败详情已追加到 {}"),
    // 运行汇总
    ("summary.title", "翻译汇总"),
    ("summary.jobs", "任务数：{}"),
    ("summary.translated", "翻译成功的 key：{}"),
    ("summary.failed", "失败的 key（保留原文）：{}"),
    ("summary.abandoned", "放弃的任务：{}"),
    ("summary.up_to_date", "已是最新：{}"),
    ("summary.skipped", "跳过（源文件缺失或无法读取）：{}"),
    ("summary.duration", "耗时：{}s"),
    // 缓存命令
    ("cache.generate_start", "根据已有翻译重建指纹..."),
    ("cache.generate_done", "指纹已重建：{} 个文件，{} 个 key"),
    ("cache.delete_done", "已从 {} 删除 key，涉及语言：{}"),
    ("cache.delete_none", "没有任何已缓存语言包含 {}"),
    // 初始化命令
    ("init.start", "正在初始化 LingoSync 配置..."),
    ("init.config_exists", "配置文件已存在：{}"),
    ("init.use_force_hint", "使用 --force 覆盖已有文件"),
    ("init.config_created", "配置文件已创建：{}"),
    (
        "init.next_steps",
        "编辑 [translate].languages，导出 API key，然后运行 `lingosync translate`",
    ),
    ("init.create_failed", "创建配置文件失败：{}"),
    // 连通性检查
    ("probe.asking", "正在询问 {}..."),
    ("probe.answer", "回答："),
    ("probe.failed", "请求失败：{}"),
];

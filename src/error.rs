use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入源错误（缺失或格式错误）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 重复检测错误
    #[error("检测错误: {0}")]
    Detection(#[from] DetectionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// PDF 解析错误
    #[error("PDF错误: {0}")]
    Pdf(#[from] PdfError),
}

/// 输入源错误
///
/// 两种情况都只影响当前数据源，由调用方决定是否继续
#[derive(Debug, Error)]
pub enum InputError {
    /// 文件或文档不存在
    #[error("输入文件不存在: {path}")]
    MissingInput { path: String },
    /// 内容无法解析，或找不到题目列表
    #[error("输入文件格式错误 ({path}): {reason}")]
    MalformedInput { path: String, reason: String },
}

/// 重复检测错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectionError {
    /// 任一数据源没有可用题目
    #[error("数据不足，无法比较: 来源1 {left} 题, 来源2 {right} 题")]
    InsufficientData { left: usize, right: usize },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({path}): {source}")]
    JsonWriteFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 相似度阈值超出范围
    #[error("相似度阈值 {0} 超出范围 [0, 100]")]
    ThresholdOutOfRange(u32),
    /// 未知的相似度算法
    #[error("未知的相似度算法: {0}")]
    UnknownMetric(String),
    /// 题号前缀为空
    #[error("题号前缀不能为空")]
    EmptyIdPrefix,
}

/// PDF 解析错误
#[derive(Debug, Error)]
pub enum PdfError {
    /// 打开文档失败
    #[error("无法打开PDF文档 ({path}): {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: lopdf::Error,
    },
    /// 提取页面文本失败
    #[error("提取第 {page} 页文本失败: {source}")]
    ExtractFailed {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
    /// 页码超出范围
    #[error("页码 {index} 超出范围 [0, {count})")]
    PageOutOfRange { index: usize, count: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建输入缺失错误
    pub fn missing_input(path: impl Into<String>) -> Self {
        AppError::Input(InputError::MissingInput { path: path.into() })
    }

    /// 创建输入格式错误
    pub fn malformed_input(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Input(InputError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为"数据不足"错误（用于区分"没有重复"和"无法比较"）
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            AppError::Detection(DetectionError::InsufficientData { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

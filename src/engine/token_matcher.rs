// ==========================================
// 学籍数据修复引擎 - 词元匹配器
// ==========================================
// 职责: 子串包含 / 词元重叠评分（纯函数，无状态）
// 红线: 仅使用子串与词元重叠启发式，不引入编辑距离
// ==========================================

/// 参与评分的最短词元长度（字符数）
pub const MIN_TOKEN_CHARS: usize = 3;

/// 完全相等的词元对得分
pub const EXACT_TOKEN_SCORE: i32 = 2;

/// 互为子串的词元对得分
pub const PARTIAL_TOKEN_SCORE: i32 = 1;

/// 大小写不敏感的子串包含
///
/// 空白 needle 视为不匹配（否则任何名称都会命中空名称的系部）
pub fn contains_substring(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle)
}

/// 小写 + 按空白切分，丢弃短于 MIN_TOKEN_CHARS 的词元
///
/// 长度按字符计（泰文/中文为多字节）
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// 词元重叠评分
///
/// 对所有词元对逐一比较: 相等 +2，否则互为子串 +1。
/// 不去重，重复词元会被重复计分。
pub fn token_overlap_score(text_a: &str, text_b: &str) -> i32 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    let mut score = 0;
    for a in &tokens_a {
        for b in &tokens_b {
            if a == b {
                score += EXACT_TOKEN_SCORE;
            } else if a.contains(b.as_str()) || b.contains(a.as_str()) {
                score += PARTIAL_TOKEN_SCORE;
            }
        }
    }
    score
}

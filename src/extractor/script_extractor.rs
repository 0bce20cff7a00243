//! HTML脚本提取器
//! 负责从HTML中提取script-src引用与内联脚本文本

use std::cell::RefCell;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

#[derive(Debug, Default, Clone)]
pub struct ScriptExtractor {
    script_srcs: RefCell<Vec<String>>,
    inline_scripts: RefCell<Vec<String>>,
    // 当前是否位于无src的script标签内（需收集文本）
    collecting: RefCell<bool>,
    text_buf: RefCell<String>,
}

impl TokenSink for ScriptExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(Tag {
                kind: TagKind::StartTag,
                name,
                attrs,
                self_closing,
            }) => {
                if name.as_ref() == "script" && !self_closing {
                    if let Some(src) = Self::find_src(&attrs) {
                        self.script_srcs.borrow_mut().push(src);
                    } else {
                        *self.collecting.borrow_mut() = true;
                        self.text_buf.borrow_mut().clear();
                    }
                    // script内容按原始文本处理，不再作为标签解析
                    return TokenSinkResult::RawData(RawKind::ScriptData);
                }
            }
            Token::TagToken(Tag {
                kind: TagKind::EndTag,
                name,
                ..
            }) => {
                if name.as_ref() == "script" && *self.collecting.borrow() {
                    *self.collecting.borrow_mut() = false;
                    let text = std::mem::take(&mut *self.text_buf.borrow_mut());
                    if !text.trim().is_empty() {
                        self.inline_scripts.borrow_mut().push(text);
                    }
                }
            }
            Token::CharacterTokens(text) => {
                if *self.collecting.borrow() {
                    self.text_buf.borrow_mut().push_str(&text);
                }
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl ScriptExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从HTML字符串提取脚本引用与内联脚本
    ///
    /// 基于html5ever流式分词，容忍畸形HTML（尽力提取，不会失败）。
    pub fn extract(&self, html: &str) -> Self {
        let tokenizer = Tokenizer::new(self.clone(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink
    }

    /// 获取提取到的script-src列表（文档顺序）
    pub fn get_script_srcs(&self) -> Vec<String> {
        self.script_srcs.borrow().clone()
    }

    /// 获取提取到的内联脚本文本列表（文档顺序）
    pub fn get_inline_scripts(&self) -> Vec<String> {
        self.inline_scripts.borrow().clone()
    }

    /// 提取src属性值
    fn find_src(attrs: &[Attribute]) -> Option<String> {
        for attr in attrs {
            if attr.name.local.as_ref() == "src" {
                return Some(attr.value.to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_extractor() {
        let html = r#"
            <script src="/app.js"></script>
            <script>const k='secret'</script>
            <script src="https://cdn.other.com/x.js"></script>
        "#;

        let extractor = ScriptExtractor::new();
        let result = extractor.extract(html);

        assert_eq!(
            result.get_script_srcs(),
            vec![
                "/app.js".to_string(),
                "https://cdn.other.com/x.js".to_string()
            ]
        );
        assert_eq!(
            result.get_inline_scripts(),
            vec!["const k='secret'".to_string()]
        );
    }

    #[test]
    fn test_inline_script_raw_text() {
        // script内容中的标签形文本不应被当作标签解析
        let html = "<script>if (a < b) { document.write('<b>x</b>'); }</script>";

        let result = ScriptExtractor::new().extract(html);
        assert_eq!(result.get_inline_scripts().len(), 1);
        assert!(result.get_inline_scripts()[0].contains("a < b"));
    }

    #[test]
    fn test_malformed_html_best_effort() {
        // 未闭合标签：尽力提取，不报错
        let html = r#"<div><script src="/a.js"><p>text"#;

        let result = ScriptExtractor::new().extract(html);
        assert_eq!(result.get_script_srcs(), vec!["/a.js".to_string()]);
    }

    #[test]
    fn test_empty_inline_script_skipped() {
        let html = "<script>   </script><script>var x = 1;</script>";

        let result = ScriptExtractor::new().extract(html);
        assert_eq!(result.get_inline_scripts(), vec!["var x = 1;".to_string()]);
    }
}

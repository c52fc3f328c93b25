//! Static category registry.
//!
//! Categories are defined in code for site navigation. Posts are not
//! validated against this list.

use serde::Serialize;

/// A second-level grouping inside a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub id: &'static str,
    pub name: &'static str,
}

/// A top-level category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub subcategories: &'static [Subcategory],
}

impl Category {
    /// Look up a subcategory by id
    pub fn find_subcategory(&self, id: &str) -> Option<&'static Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    pub fn has_subcategories(&self) -> bool {
        !self.subcategories.is_empty()
    }
}

static CATEGORIES: &[Category] = &[
    Category {
        id: "tech",
        name: "技术文章",
        description: "技术见解、教程和最佳实践",
        icon: "💻",
        subcategories: &[
            Subcategory { id: "csharp", name: "C#" },
            Subcategory { id: "java", name: "Java" },
            Subcategory { id: "javascript", name: "JavaScript" },
            Subcategory { id: "frontend", name: "前端开发" },
        ],
    },
    Category {
        id: "tools",
        name: "工具与配置",
        description: "开发工具、配置指南和效率提升",
        icon: "🛠️",
        subcategories: &[Subcategory { id: "development", name: "开发工具" }],
    },
    Category {
        id: "demo",
        name: "代码演示",
        description: "实际代码示例和项目展示",
        icon: "🚀",
        subcategories: &[Subcategory { id: "showcase", name: "项目展示" }],
    },
    Category {
        id: "web3",
        name: "Web3 & 加密货币",
        description: "区块链技术、加密货币和 Web3 相关内容",
        icon: "💰",
        subcategories: &[Subcategory { id: "crypto", name: "加密货币" }],
    },
    Category {
        id: "bec",
        name: "商务英语",
        description: "初级商务英语备考",
        icon: "📖",
        subcategories: &[
            Subcategory { id: "personal", name: "个人备考" },
            Subcategory { id: "test", name: "测试练习" },
        ],
    },
];

/// All registered categories in display order
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// Look up a registered category by id
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Check whether a category (and subcategory, if any) is in the registry
pub fn is_registered(category: &str, subcategory: Option<&str>) -> bool {
    match (find_category(category), subcategory) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(cat), Some(sub)) => cat.find_subcategory(sub).is_some(),
    }
}

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    /// Settings code for the language
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    /// Parse a settings code; unknown codes fall back to Russian
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Ru,
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open_model" => if ru { "Открыть модель..." } else { "Open model..." },
        "menu.open_model_title" => if ru { "Открыть JSON модели" } else { "Open Model JSON" },
        "menu.builtin_model" => if ru { "Модель автомобиля заказа" } else { "Job vehicle model" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.jobs_panel" => if ru { "Заказы" } else { "Jobs" },
        "menu.work_panel" => if ru { "Панель работ" } else { "Work panel" },
        "menu.markers" => if ru { "Метки зон на модели" } else { "Zone markers on model" },
        "menu.auto_rotate" => if ru { "Автовращение" } else { "Auto rotate" },
        "menu.reset_camera" => if ru { "Сбросить камеру  Home" } else { "Reset camera  Home" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Jobs ───────────────────────────────────────────
        "jobs.title" => if ru { "Заказы" } else { "Jobs" },

        // ── Timer ──────────────────────────────────────────
        "timer.title" => if ru { "Время работы" } else { "Work time" },
        "timer.start" => if ru { "▶ Старт" } else { "▶ Start" },
        "timer.pause" => if ru { "⏸ Пауза" } else { "⏸ Pause" },
        "timer.reset" => if ru { "⟲ Сброс" } else { "⟲ Reset" },

        // ── Paint ──────────────────────────────────────────
        "paint.title" => if ru { "Цвет кузова" } else { "Body color" },
        "paint.invalid" => if ru { "Не удалось распознать цвет" } else { "Color not recognized" },
        "paint.red" => if ru { "Красный" } else { "Red" },
        "paint.blue" => if ru { "Синий" } else { "Blue" },
        "paint.black" => if ru { "Чёрный" } else { "Black" },
        "paint.white" => if ru { "Белый" } else { "White" },
        "paint.silver" => if ru { "Серебристый" } else { "Silver" },
        "paint.green" => if ru { "Зелёный" } else { "Green" },
        "paint.orange" => if ru { "Оранжевый" } else { "Orange" },

        // ── Zones ──────────────────────────────────────────
        "zones.intake" => if ru { "Приёмка" } else { "Intake" },
        "zones.work" => if ru { "Работы" } else { "Work" },
        "zones.noted" => if ru { "Отмечено повреждений" } else { "Damage noted" },
        "zones.done" => if ru { "Готово" } else { "Done" },
        "zones.mark_done" => if ru { "Отметить выполненным" } else { "Mark done" },

        // ── Viewer ─────────────────────────────────────────
        "viewer.loading" => if ru { "Загрузка модели..." } else { "Loading model..." },
        "viewer.could_not_load" => if ru { "Не удалось загрузить модель" } else { "Could not load model" },
        "part.paintable" => if ru { "Окрашиваемая панель" } else { "Paintable panel" },
        "part.excluded" => if ru { "Не окрашивается" } else { "Not painted" },
        "part.untouched" => if ru { "Без изменений" } else { "Unchanged" },

        // ── Status bar ─────────────────────────────────────
        "status.meshes" => if ru { "Детали" } else { "Meshes" },
        "status.vertices" => if ru { "Вершины" } else { "Vertices" },
        "status.scale" => if ru { "Масштаб" } else { "Scale" },
        "status.painted" => if ru { "Окрашено" } else { "Painted" },
        "status.excluded" => if ru { "Исключено" } else { "Excluded" },
        "status.timer_running" => if ru { "⏱ Идёт работа" } else { "⏱ Working on" },

        // ── Settings window ────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.viewer" => if ru { "Модель" } else { "Model" },
        "settings.target_size" => if ru { "Размер модели:" } else { "Model size:" },
        "settings.metalness_max" => if ru { "Макс. металличность:" } else { "Max metalness:" },
        "settings.roughness_min" => if ru { "Мин. шероховатость:" } else { "Min roughness:" },
        "settings.default_color" => if ru { "Цвет по умолчанию:" } else { "Default color:" },

        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки:" } else { "Cell size:" },
        "settings.grid_range" => if ru { "Количество линий:" } else { "Line count:" },
        "settings.grid_opacity" => if ru { "Прозрачность:" } else { "Opacity:" },

        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона:" } else { "Background:" },

        "settings.zone_colors" => if ru { "Цвета зон" } else { "Zone colors" },
        "settings.zone_default" => if ru { "Обычная" } else { "Default" },
        "settings.zone_hovered" => if ru { "Под курсором" } else { "Hovered" },
        "settings.zone_selected" => if ru { "Выбрана" } else { "Selected" },
        "settings.zone_completed" => if ru { "Выполнена" } else { "Completed" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта:" } else { "Font size:" },

        "settings.apply" => if ru { "Сохранить" } else { "Save" },
        "settings.reset" => if ru { "По умолчанию" } else { "Defaults" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Lang::from_code("EN"), Lang::En);
        assert_eq!(Lang::from_code("de"), Lang::Ru);
        assert_eq!(Lang::from_code(Lang::En.code()), Lang::En);
    }
}

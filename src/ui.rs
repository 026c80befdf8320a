use crate::messages::GOAL_ACHIEVED;
use crate::models::{DailyPoint, TodayResponse};

pub struct IndexView {
    pub today: TodayResponse,
    pub history: Vec<DailyPoint>,
    pub tip: &'static str,
    pub notice: Option<&'static str>,
}

pub fn render_index(view: &IndexView) -> String {
    let history = serde_json::to_string(&view.history).unwrap_or_else(|_| "[]".to_string());
    let celebration = if view.today.achieved { GOAL_ACHIEVED } else { "" };

    INDEX_HTML
        .replace("{{DATE}}", &view.today.date)
        .replace("{{INTAKE_MESSAGE}}", &view.today.intake_message)
        .replace("{{SUMMARY}}", &view.today.summary)
        .replace("{{GOAL}}", &format!("{:.2}", view.today.goal))
        .replace("{{PERCENT}}", &format!("{:.0}", view.today.percent))
        .replace("{{CELEBRATION}}", celebration)
        .replace("{{NOTICE}}", view.notice.unwrap_or(""))
        .replace("{{TIP}}", view.tip)
        .replace("{{HISTORY}}", &history)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Hydration Tracker</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    :root {
      --bg-1: #e8f5fd;
      --bg-2: #bfe3fb;
      --ink: #14314f;
      --accent: #2967ad;
      --accent-2: #57b8fa;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(20, 67, 121, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4fbff 60%, #e3f1fb 100%);
      color: var(--ink);
      font-family: "Segoe UI", Arial, sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(820px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 26px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
    }

    .subtitle {
      margin: 0;
      color: #4e6f91;
    }

    .row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 20px;
      align-items: center;
    }

    form {
      display: flex;
      gap: 10px;
    }

    input {
      flex: 1;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid #90caf9;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 12px;
      padding: 10px 18px;
      font-weight: 600;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
    }

    button.secondary {
      background: var(--accent-2);
    }

    .ring {
      position: relative;
      width: 120px;
      height: 120px;
    }

    .ring span {
      position: absolute;
      inset: 0;
      display: grid;
      place-items: center;
      font-weight: 700;
      font-size: 1.3rem;
    }

    #progressCircle {
      transition: stroke-dashoffset 0.95s cubic-bezier(.57, .81, .29, 1.01);
    }

    .chart-card {
      height: 220px;
    }

    .notice {
      min-height: 1.2em;
      font-weight: 600;
      color: #0277bd;
    }

    .celebration {
      font-weight: 700;
      color: #1b8a5a;
      min-height: 1.2em;
    }

    .tip {
      background: #f0f8ff;
      border-radius: 16px;
      padding: 16px 20px;
      display: flex;
      justify-content: space-between;
      gap: 16px;
      align-items: center;
    }

    .confetti-dot {
      position: absolute;
      border-radius: 50%;
      transition: top 1.4s ease-in, opacity 1.4s ease-in;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Hydration Tracker</h1>
      <p class="subtitle">Log today's water, keep a daily goal, and watch the last 7 days.</p>
      <p class="subtitle">Today: <span id="date">{{DATE}}</span></p>
    </header>

    <section class="row">
      <div>
        <p id="waterMessage">{{INTAKE_MESSAGE}}</p>
        <form id="waterForm" method="post" action="/intake">
          <input id="waterInput" name="liters" type="number" step="0.05" min="0" placeholder="Liters today" />
          <button type="submit">Save</button>
        </form>
      </div>
      <div>
        <form id="goalForm" method="post" action="/goal">
          <input id="goalInput" name="goal" type="number" step="0.1" min="0.3" max="10" value="{{GOAL}}" />
          <button class="secondary" type="submit">Save Goal</button>
        </form>
        <p id="hydrationSummary" aria-live="polite">{{SUMMARY}}</p>
      </div>
      <div class="ring">
        <svg width="120" height="120" viewBox="0 0 100 100" role="img" aria-label="Daily goal progress">
          <circle cx="50" cy="50" r="40" stroke="#e0effa" stroke-width="10" fill="none" />
          <circle id="progressCircle" cx="50" cy="50" r="40" stroke="#2967ad" stroke-width="10" fill="none"
            stroke-linecap="round" transform="rotate(-90 50 50)" />
        </svg>
        <span id="progressPercent">{{PERCENT}}%</span>
      </div>
    </section>

    <div class="celebration" id="celebration">{{CELEBRATION}}</div>
    <div class="notice" id="successMessage">{{NOTICE}}</div>

    <section>
      <h2>Last 7 days</h2>
      <div class="chart-card">
        <canvas id="waterChart" aria-label="Water intake for the last 7 days" role="img"></canvas>
      </div>
    </section>

    <section class="tip">
      <p id="tip">{{TIP}}</p>
      <button class="secondary" id="newTipBtn" type="button">New Tip</button>
    </section>
  </main>

  <script>
    const initialHistory = {{HISTORY}};
    const circumference = 2 * Math.PI * 40;
    const progressCircle = document.getElementById('progressCircle');
    const notice = document.getElementById('successMessage');
    let waterChart;

    const setProgress = (percent) => {
      progressCircle.setAttribute('stroke-dasharray', circumference);
      progressCircle.setAttribute('stroke-dashoffset', circumference * (1 - percent / 100));
      document.getElementById('progressPercent').innerText = `${Math.round(percent)}%`;
    };

    const showNotice = (msg) => {
      notice.innerText = msg;
      setTimeout(() => { notice.innerText = ''; }, 1650);
    };

    const confetti = () => {
      if (document.getElementById('confetti-box')) return;
      const box = document.createElement('div');
      box.id = 'confetti-box';
      Object.assign(box.style, {
        position: 'fixed', left: 0, top: 0, width: '100vw', height: '100vh',
        pointerEvents: 'none', zIndex: 30
      });
      for (let i = 0; i < 26; ++i) {
        const dot = document.createElement('div');
        dot.className = 'confetti-dot';
        const size = `${0.61 + Math.random() * 0.36}rem`;
        Object.assign(dot.style, {
          background: `hsl(${180 + Math.random() * 110},90%,${63 + Math.random() * 20}%)`,
          left: `${4 + Math.random() * 92}vw`,
          top: `-${Math.random() * 6}vh`,
          width: size,
          height: size
        });
        box.appendChild(dot);
        setTimeout(() => {
          dot.style.top = `${64 + Math.random() * 27}vh`;
          dot.style.opacity = 0.18 + Math.random() * 0.36;
        }, Math.random() * 380);
      }
      document.body.appendChild(box);
      setTimeout(() => box.remove(), 2100);
    };

    const renderChart = (days) => {
      if (typeof Chart === 'undefined') return;
      if (waterChart) waterChart.destroy();
      waterChart = new Chart(document.getElementById('waterChart'), {
        type: 'bar',
        data: {
          labels: days.map((day) => day.label),
          datasets: [{
            label: 'Liters of Water',
            data: days.map((day) => day.liters),
            backgroundColor: '#298DCE',
            borderRadius: 15,
            maxBarThickness: 44
          }]
        },
        options: {
          responsive: true,
          maintainAspectRatio: false,
          plugins: { legend: { display: false } },
          scales: {
            x: { grid: { display: false } },
            y: { beginAtZero: true, suggestedMax: 3.3, ticks: { stepSize: 0.5 } }
          }
        }
      });
    };

    const updateToday = (today, celebrate) => {
      document.getElementById('waterMessage').innerText = today.intake_message;
      document.getElementById('hydrationSummary').innerText = today.summary;
      document.getElementById('goalInput').value = today.goal.toFixed(2);
      setProgress(today.percent);
      const celebration = document.getElementById('celebration');
      celebration.innerText = today.achieved ? 'Goal achieved \u{1F389}' : '';
      if (today.achieved && celebrate) confetti();
    };

    const loadHistory = async () => {
      const res = await fetch('/api/history');
      if (!res.ok) throw new Error('Unable to load history');
      renderChart((await res.json()).days);
    };

    const loadToday = async (celebrate) => {
      const res = await fetch('/api/today');
      if (!res.ok) throw new Error('Unable to load today');
      updateToday(await res.json(), celebrate);
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      const payload = await res.json();
      if (!res.ok) throw new Error(payload.error || 'Request failed');
      return payload;
    };

    document.getElementById('waterForm').addEventListener('submit', (event) => {
      event.preventDefault();
      const input = document.getElementById('waterInput');
      post('/api/intake', { liters: input.value })
        .then((today) => {
          input.value = '';
          updateToday(today, true);
          showNotice('Water intake updated!');
          return loadHistory();
        })
        .catch((err) => { document.getElementById('waterMessage').innerText = err.message; });
    });

    document.getElementById('goalForm').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/goal', { goal: document.getElementById('goalInput').value })
        .then(() => loadToday(true))
        .then(() => showNotice('Goal saved!'))
        .catch((err) => showNotice(err.message));
    });

    document.getElementById('newTipBtn').addEventListener('click', () => {
      fetch('/api/tip')
        .then((res) => res.json())
        .then((body) => { document.getElementById('tip').innerText = body.tip; })
        .catch(() => {});
    });

    setProgress({{PERCENT}});
    renderChart(initialHistory);
    if (notice.innerText) showNotice(notice.innerText);
  </script>
</body>
</html>
"##;
